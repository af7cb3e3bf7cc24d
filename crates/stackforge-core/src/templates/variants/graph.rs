//! Neo4j + neo4j-migrations
//!
//! The project name doubles as the Go module path here, so it uses the
//! permissive name class.

use super::entry;
use crate::input::{FieldKind, NameClass};
use crate::project::StackVariant;
use crate::templates::catalog::VariantCatalog;

pub fn catalog() -> VariantCatalog {
    VariantCatalog::new(StackVariant::GraphWithMigrations, NameClass::Permissive)
        .fields(&[FieldKind::ProjectName, FieldKind::DbUser, FieldKind::DbPassword])
        .entry(entry!("graph", ".gitignore").requires(&["credentialIgnores", "projectDir"]))
        .entry(
            entry!("graph", ".env")
                .requires(&[
                    "dbScheme",
                    "dbHost",
                    "dbPort",
                    "dbUser",
                    "dbPassword",
                    "databaseName",
                    "listenPort",
                ])
                .credential_bearing(),
        )
        .entry(
            entry!("graph", ".migrations.properties")
                .requires(&["dbScheme", "dbHost", "dbPort", "dbUser", "dbPassword", "databaseName"])
                .credential_bearing(),
        )
        .entry(entry!("graph", "db/migrations/V001__create_person_constraints.cypher"))
        .entry(entry!("graph", "db/migrations/V002__create_person_indexes.cypher"))
        .entry(entry!("graph", "cmd/server/main.go").requires(&["projectName", "listenPort"]))
        .entry(entry!("graph", "internal/graph/driver.go").requires(&["databaseName"]))
        .entry(entry!("graph", "internal/handlers/people.go").requires(&["projectName"]))
        .entry(entry!("graph", "commands.txt").requires(&["projectName", "projectDir"]))
        .entry(
            entry!("graph", "README.md")
                .requires(&["projectDir", "projectName", "databaseName", "listenPort"]),
        )
        .entry(entry!("graph", ".stackforge.yaml").requires(&["variant", "catalogVersion"]))
}
