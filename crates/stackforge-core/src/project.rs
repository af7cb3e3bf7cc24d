//! Stack variants and the validated project description

use crate::error::ValidationError;
use crate::input::{FieldKind, InputValidator, NameClass, RawInput, Secret};
use crate::templates::catalog;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The closed set of stacks a project can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StackVariant {
    /// Neo4j with versioned Cypher migrations
    GraphWithMigrations,
    /// PostgreSQL with sqlc query code generation
    RelationalWithCodegen,
    /// PostgreSQL with a Redis session cache
    RelationalWithCache,
}

impl StackVariant {
    pub const ALL: [StackVariant; 3] = [
        StackVariant::GraphWithMigrations,
        StackVariant::RelationalWithCodegen,
        StackVariant::RelationalWithCache,
    ];

    /// Stable identifier used on the command line and in project stamps
    pub fn id(&self) -> &'static str {
        match self {
            StackVariant::GraphWithMigrations => "graph",
            StackVariant::RelationalWithCodegen => "relational-codegen",
            StackVariant::RelationalWithCache => "relational-cache",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StackVariant::GraphWithMigrations => "Graph database with migrations",
            StackVariant::RelationalWithCodegen => "Relational database with query codegen",
            StackVariant::RelationalWithCache => "Relational database with session cache",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StackVariant::GraphWithMigrations => "Go + Neo4j, Cypher migrations",
            StackVariant::RelationalWithCodegen => "Go + PostgreSQL, Flyway migrations, sqlc",
            StackVariant::RelationalWithCache => "Go + PostgreSQL + Redis sessions, Flyway migrations",
        }
    }

    /// Fields the user must supply for this variant
    pub fn required_fields(&self) -> BTreeSet<FieldKind> {
        catalog().required_fields(*self)
    }

    /// Character class accepted for the project name
    pub fn name_class(&self) -> NameClass {
        catalog().name_class(*self)
    }

    /// Commands handed to the user once the tree is on disk, as run from
    /// `current_dir`.
    ///
    /// These belong to external tools and are printed, never executed.
    pub fn next_steps(&self, dir: &Path, current_dir: &Path, project_name: &str) -> Vec<String> {
        let mut steps = Vec::new();

        if current_dir != dir {
            steps.push(format!("cd {}", dir.display()));
        }
        steps.push(format!("go mod init {}", project_name));

        match self {
            StackVariant::GraphWithMigrations => {
                steps.push("go mod tidy".to_string());
                steps.push("neo4j-migrations migrate".to_string());
            }
            StackVariant::RelationalWithCodegen => {
                steps.push("sqlc generate".to_string());
                steps.push("go mod tidy".to_string());
                steps.push("flyway -configFiles=flyway.conf migrate".to_string());
            }
            StackVariant::RelationalWithCache => {
                steps.push("go mod tidy".to_string());
                steps.push("flyway -configFiles=flyway.conf migrate".to_string());
            }
        }

        steps.push("go build ./...".to_string());
        steps
    }
}

impl fmt::Display for StackVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for StackVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StackVariant::ALL
            .into_iter()
            .find(|v| v.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let ids: Vec<&str> = StackVariant::ALL.iter().map(|v| v.id()).collect();
                format!("unknown stack variant '{}' (expected one of: {})", s, ids.join(", "))
            })
    }
}

/// Validated, immutable description of the project to generate
#[derive(Debug, Clone)]
pub struct ProjectSpec {
    project_name: String,
    database_name: Option<String>,
    db_user: String,
    db_password: Secret,
    variant: StackVariant,
}

impl ProjectSpec {
    /// Validate every field `variant` requires.
    ///
    /// A database name supplied to a variant that does not require one is
    /// still validated and kept.
    pub fn from_input(raw: RawInput, variant: StackVariant) -> Result<Self, ValidationError> {
        let validator = InputValidator::new(variant.name_class());
        let required = variant.required_fields();

        let project_name = validator
            .validate(FieldKind::ProjectName, &raw.project_name)?
            .into_text();

        let database_name = match raw.database_name {
            Some(name) => Some(
                validator
                    .validate(FieldKind::DatabaseName, &name)?
                    .into_text(),
            ),
            None if required.contains(&FieldKind::DatabaseName) => {
                return Err(ValidationError::new(FieldKind::DatabaseName, "is required"));
            }
            None => None,
        };

        let db_user = validator.validate(FieldKind::DbUser, &raw.db_user)?.into_text();
        let db_password = validator
            .validate(FieldKind::DbPassword, raw.db_password.expose())?
            .into_secret();

        Ok(Self {
            project_name,
            database_name,
            db_user,
            db_password,
            variant,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Directory the project is generated into: the last segment of the name
    pub fn project_dir(&self) -> &str {
        self.project_name
            .rsplit('/')
            .next()
            .unwrap_or(&self.project_name)
    }

    pub fn database_name(&self) -> Option<&str> {
        self.database_name.as_deref()
    }

    pub fn db_user(&self) -> &str {
        &self.db_user
    }

    pub fn db_password(&self) -> &Secret {
        &self.db_password
    }

    pub fn variant(&self) -> StackVariant {
        self.variant
    }
}
