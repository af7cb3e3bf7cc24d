//! Error taxonomy for a generation run
//!
//! Every error aborts the run. None are retried, and nothing already written
//! to disk is rolled back.

use crate::input::FieldKind;
use crate::pipeline::RunState;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for rejected user input
pub const EXIT_VALIDATION: i32 = 2;
/// Exit status for an internal bug: catalog or run sequencing (sysexits `EX_SOFTWARE`)
pub const EXIT_CATALOG: i32 = 70;
/// Exit status for a filesystem failure (sysexits `EX_IOERR`)
pub const EXIT_MATERIALIZATION: i32 = 74;

/// Bad user input. Recoverable only by re-running with corrected values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: FieldKind,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: FieldKind, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// A template catalog that disagrees with itself or with the binder.
///
/// These are bugs in the built-in catalog, never caused by user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogConsistencyError {
    #[error("template {path} references {{{{{variable}}}}} but the context has no such variable")]
    MissingVariable { path: String, variable: String },

    #[error("template {path} uses {{{{{variable}}}}} without declaring it")]
    UndeclaredPlaceholder { path: String, variable: String },

    #[error("template {path} declares `{variable}` but never uses it")]
    UnusedVariable { path: String, variable: String },

    #[error("template path `{path}` is not a safe relative path")]
    UnsafePath { path: String },

    #[error("{variant} declares {path} more than once")]
    DuplicatePath { variant: String, path: String },

    #[error("credential-bearing {path} is not excluded by the {variant} ignore list")]
    CredentialNotIgnored { variant: String, path: String },

    #[error("{variant} template {path} uses {{{{{variable}}}}} but is not credential-bearing")]
    SecretInPlainEntry {
        variant: String,
        path: String,
        variable: String,
    },
}

/// I/O failure while writing the project tree.
#[derive(Debug, Error)]
#[error("failed to {action} {}: {source}", .path.display())]
pub struct MaterializationError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl MaterializationError {
    pub(crate) fn create_dir(path: PathBuf, source: std::io::Error) -> Self {
        Self {
            action: "create directory",
            path,
            source,
        }
    }

    pub(crate) fn write(path: PathBuf, source: std::io::Error) -> Self {
        Self {
            action: "write",
            path,
            source,
        }
    }
}

/// Any reason a run ends in `Aborted`
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Catalog(#[from] CatalogConsistencyError),

    #[error(transparent)]
    Materialization(#[from] MaterializationError),

    /// A step was driven out of order or after the run ended
    #[error("cannot move a {from} run to {to}")]
    IllegalTransition { from: RunState, to: RunState },
}

impl ScaffoldError {
    /// Process exit status to report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ScaffoldError::Validation(_) => EXIT_VALIDATION,
            ScaffoldError::Catalog(_) | ScaffoldError::IllegalTransition { .. } => EXIT_CATALOG,
            ScaffoldError::Materialization(_) => EXIT_MATERIALIZATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = ValidationError::new(FieldKind::DatabaseName, "contains ' '");
        assert_eq!(err.to_string(), "invalid database name: contains ' '");
    }

    #[test]
    fn test_missing_variable_message() {
        let err = CatalogConsistencyError::MissingVariable {
            path: ".env".to_string(),
            variable: "dbHost".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "template .env references {{dbHost}} but the context has no such variable"
        );
    }

    #[test]
    fn test_exit_codes() {
        let validation: ScaffoldError = ValidationError::new(FieldKind::ProjectName, "x").into();
        assert_eq!(validation.exit_code(), EXIT_VALIDATION);

        let io = MaterializationError::write(
            PathBuf::from("/tmp/x"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        let materialization: ScaffoldError = io.into();
        assert_eq!(materialization.exit_code(), EXIT_MATERIALIZATION);
        assert!(materialization.to_string().starts_with("failed to write /tmp/x"));

        let transition = ScaffoldError::IllegalTransition {
            from: RunState::Completed,
            to: RunState::Validating,
        };
        assert_eq!(transition.exit_code(), EXIT_CATALOG);
        assert_eq!(transition.to_string(), "cannot move a completed run to validating");
    }
}
