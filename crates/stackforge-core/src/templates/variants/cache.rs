//! PostgreSQL + Flyway + Redis sessions

use super::entry;
use crate::input::{FieldKind, NameClass};
use crate::project::StackVariant;
use crate::templates::catalog::VariantCatalog;

pub fn catalog() -> VariantCatalog {
    VariantCatalog::new(StackVariant::RelationalWithCache, NameClass::Strict)
        .fields(&[
            FieldKind::ProjectName,
            FieldKind::DatabaseName,
            FieldKind::DbUser,
            FieldKind::DbPassword,
        ])
        .entry(entry!("relational-cache", ".gitignore").requires(&["credentialIgnores", "projectDir"]))
        .entry(
            entry!("relational-cache", ".env")
                .requires(&[
                    "dbScheme",
                    "dbUser",
                    "dbPassword",
                    "dbHost",
                    "dbPort",
                    "databaseName",
                    "cacheHost",
                    "cachePort",
                    "listenPort",
                ])
                .credential_bearing(),
        )
        .entry(
            entry!("relational-cache", "flyway.conf")
                .requires(&["dbHost", "dbPort", "databaseName", "dbUser", "dbPassword"])
                .credential_bearing(),
        )
        .entry(entry!("relational-cache", "db/migrations/V1__init.sql"))
        .entry(entry!("relational-cache", "db/migrations/V2__login_audit.sql"))
        .entry(entry!("relational-cache", "cmd/server/main.go").requires(&["projectName", "listenPort"]))
        .entry(entry!("relational-cache", "internal/session/store.go").requires(&["projectDir"]))
        .entry(entry!("relational-cache", "internal/handlers/auth.go").requires(&["projectName"]))
        .entry(
            entry!("relational-cache", "commands.txt")
                .requires(&["projectName", "projectDir", "cacheHost", "cachePort"]),
        )
        .entry(
            entry!("relational-cache", "README.md")
                .requires(&["projectDir", "databaseName", "cacheHost", "cachePort", "listenPort"]),
        )
        .entry(entry!("relational-cache", ".stackforge.yaml").requires(&["variant", "catalogVersion"]))
}
