//! PostgreSQL + Flyway + sqlc

use super::entry;
use crate::input::{FieldKind, NameClass};
use crate::project::StackVariant;
use crate::templates::catalog::VariantCatalog;

pub fn catalog() -> VariantCatalog {
    VariantCatalog::new(StackVariant::RelationalWithCodegen, NameClass::Strict)
        .fields(&[
            FieldKind::ProjectName,
            FieldKind::DatabaseName,
            FieldKind::DbUser,
            FieldKind::DbPassword,
        ])
        .entry(entry!("relational-codegen", ".gitignore").requires(&["credentialIgnores", "projectDir"]))
        .entry(
            entry!("relational-codegen", ".env")
                .requires(&[
                    "dbScheme",
                    "dbUser",
                    "dbPassword",
                    "dbHost",
                    "dbPort",
                    "databaseName",
                    "listenPort",
                ])
                .credential_bearing(),
        )
        .entry(
            entry!("relational-codegen", "flyway.conf")
                .requires(&["dbHost", "dbPort", "databaseName", "dbUser", "dbPassword"])
                .credential_bearing(),
        )
        .entry(entry!("relational-codegen", "db/migrations/V1__init.sql"))
        .entry(entry!("relational-codegen", "db/query/users.sql"))
        .entry(entry!("relational-codegen", "sqlc.yaml"))
        .entry(entry!("relational-codegen", "cmd/server/main.go").requires(&["projectName", "listenPort"]))
        .entry(entry!("relational-codegen", "internal/handlers/users.go").requires(&["projectName"]))
        .entry(entry!("relational-codegen", "commands.txt").requires(&["projectName", "projectDir"]))
        .entry(
            entry!("relational-codegen", "README.md")
                .requires(&["projectDir", "databaseName", "listenPort"]),
        )
        .entry(entry!("relational-codegen", ".stackforge.yaml").requires(&["variant", "catalogVersion"]))
}
