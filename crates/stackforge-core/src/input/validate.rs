//! Per-field syntactic rules for user input

use super::secret::Secret;
use crate::error::ValidationError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static STRICT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("valid regex"));
static PERMISSIVE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-A-Za-z0-9_./:]+$").expect("valid regex"));
static SQL_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"));

/// Fields the user is asked for, in prompt order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    ProjectName,
    DatabaseName,
    DbUser,
    DbPassword,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::ProjectName,
        FieldKind::DatabaseName,
        FieldKind::DbUser,
        FieldKind::DbPassword,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::ProjectName => "project name",
            FieldKind::DatabaseName => "database name",
            FieldKind::DbUser => "database username",
            FieldKind::DbPassword => "database password",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Character class accepted for the project name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    /// `[A-Za-z0-9-]+`
    Strict,
    /// `[-A-Za-z0-9_./:]+`, for names that double as a module import path
    Permissive,
}

impl NameClass {
    fn regex(&self) -> &'static Regex {
        match self {
            NameClass::Strict => &STRICT_NAME,
            NameClass::Permissive => &PERMISSIVE_NAME,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            NameClass::Strict => "letters, digits and '-'",
            NameClass::Permissive => "letters, digits and '-', '_', '.', '/', ':'",
        }
    }
}

/// A value that passed its field's rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedValue {
    Text(String),
    Secret(Secret),
}

impl ValidatedValue {
    pub fn into_text(self) -> String {
        match self {
            ValidatedValue::Text(value) => value,
            ValidatedValue::Secret(secret) => secret.expose().to_string(),
        }
    }

    pub fn into_secret(self) -> Secret {
        match self {
            ValidatedValue::Text(value) => Secret::new(value),
            ValidatedValue::Secret(secret) => secret,
        }
    }
}

/// Validates raw strings against the rules of the active stack variant
#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    name_class: NameClass,
}

impl InputValidator {
    pub fn new(name_class: NameClass) -> Self {
        Self { name_class }
    }

    pub fn name_class(&self) -> NameClass {
        self.name_class
    }

    pub fn validate(&self, field: FieldKind, raw: &str) -> Result<ValidatedValue, ValidationError> {
        match field {
            FieldKind::ProjectName => self.validate_project_name(raw),
            FieldKind::DatabaseName => {
                check_class(field, raw, &SQL_IDENTIFIER, "letters, digits and '_'")?;
                Ok(ValidatedValue::Text(raw.to_string()))
            }
            FieldKind::DbUser => {
                if raw.is_empty() {
                    return Err(ValidationError::new(field, "must not be empty"));
                }
                check_single_line(field, raw)?;
                Ok(ValidatedValue::Text(raw.to_string()))
            }
            FieldKind::DbPassword => {
                check_single_line(field, raw)?;
                Ok(ValidatedValue::Secret(Secret::new(raw)))
            }
        }
    }

    fn validate_project_name(&self, raw: &str) -> Result<ValidatedValue, ValidationError> {
        let field = FieldKind::ProjectName;
        check_class(field, raw, self.name_class.regex(), self.name_class.describe())?;

        // The last segment names the project directory, so a module path may
        // not contain segments that walk out of it.
        if self.name_class == NameClass::Permissive {
            if let Some(segment) = raw
                .split('/')
                .find(|s| s.is_empty() || *s == "." || *s == "..")
            {
                let reason = if segment.is_empty() {
                    "contains an empty path segment".to_string()
                } else {
                    format!("contains the path segment '{}'", segment)
                };
                return Err(ValidationError::new(field, reason));
            }
        }

        Ok(ValidatedValue::Text(raw.to_string()))
    }
}

fn check_class(
    field: FieldKind,
    raw: &str,
    class: &Regex,
    allowed: &str,
) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if class.is_match(raw) {
        return Ok(());
    }

    let mut offending: Vec<String> = Vec::new();
    for c in raw.chars() {
        let quoted = format!("{:?}", c);
        if !class.is_match(c.encode_utf8(&mut [0; 4])) && !offending.contains(&quoted) {
            offending.push(quoted);
        }
    }

    Err(ValidationError::new(
        field,
        format!("contains {} (allowed: {})", offending.join(", "), allowed),
    ))
}

// Env and properties files are line oriented; a line break would split a value.
fn check_single_line(field: FieldKind, raw: &str) -> Result<(), ValidationError> {
    if raw.contains(['\n', '\r']) {
        return Err(ValidationError::new(field, "must not contain line breaks"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> InputValidator {
        InputValidator::new(NameClass::Strict)
    }

    fn permissive() -> InputValidator {
        InputValidator::new(NameClass::Permissive)
    }

    #[test]
    fn test_strict_name_accepts_class() {
        for name in ["my-app1", "sample-api", "A", "0-0"] {
            assert!(strict().validate(FieldKind::ProjectName, name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_strict_name_rejects_outside_class() {
        for name in ["my app!", "my_app", "a/b", "", "naïve"] {
            assert!(strict().validate(FieldKind::ProjectName, name).is_err(), "{}", name);
        }
    }

    #[test]
    fn test_strict_rejection_lists_offending_chars() {
        let err = strict()
            .validate(FieldKind::ProjectName, "my app!")
            .unwrap_err();
        assert_eq!(err.field, FieldKind::ProjectName);
        assert!(err.reason.contains("' '"));
        assert!(err.reason.contains("'!'"));
    }

    #[test]
    fn test_permissive_name_accepts_module_paths() {
        for name in ["github.com/acme/sample-api", "gitlab.example:8443/x/y_z", "app"] {
            assert!(permissive().validate(FieldKind::ProjectName, name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_permissive_name_rejects_traversal_segments() {
        for name in ["../escape", "github.com/acme/..", "a//b", "trailing/", "./x"] {
            assert!(permissive().validate(FieldKind::ProjectName, name).is_err(), "{}", name);
        }
    }

    #[test]
    fn test_database_name_is_sql_identifier() {
        assert!(strict().validate(FieldKind::DatabaseName, "sample_db1").is_ok());
        let err = strict()
            .validate(FieldKind::DatabaseName, "sample db")
            .unwrap_err();
        assert_eq!(err.field, FieldKind::DatabaseName);
        assert!(strict().validate(FieldKind::DatabaseName, "sample-db").is_err());
    }

    #[test]
    fn test_credentials_are_opaque() {
        let value = strict()
            .validate(FieldKind::DbPassword, "p@ss w0rd!#$")
            .unwrap();
        assert_eq!(value.into_secret().expose(), "p@ss w0rd!#$");
        assert!(strict().validate(FieldKind::DbUser, "admin user").is_ok());
    }

    #[test]
    fn test_password_error_never_echoes_value() {
        let err = strict()
            .validate(FieldKind::DbPassword, "top\nsecret")
            .unwrap_err();
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn test_empty_username_rejected() {
        assert!(strict().validate(FieldKind::DbUser, "").is_err());
    }

    #[test]
    fn test_credentials_reject_line_breaks() {
        for raw in ["admin\n", "ad\rmin"] {
            let err = strict().validate(FieldKind::DbUser, raw).unwrap_err();
            assert_eq!(err.field, FieldKind::DbUser);
            assert_eq!(err.reason, "must not contain line breaks");
        }
        assert!(strict().validate(FieldKind::DbPassword, "p@ss:w/rd").is_ok());
    }
}
