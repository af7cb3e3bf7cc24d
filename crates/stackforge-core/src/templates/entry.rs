//! A single output file of a variant catalog

use super::render;
use crate::error::CatalogConsistencyError;
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// One file a variant produces: where it goes, what it contains, and which
/// placeholders its body uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    relative_path: &'static str,
    body: &'static str,
    required_variables: BTreeSet<&'static str>,
    credential_bearing: bool,
}

impl TemplateEntry {
    pub fn new(relative_path: &'static str, body: &'static str) -> Self {
        Self {
            relative_path,
            body,
            required_variables: BTreeSet::new(),
            credential_bearing: false,
        }
    }

    /// Declare the placeholders this body uses
    pub fn requires(mut self, variables: &[&'static str]) -> Self {
        self.required_variables.extend(variables.iter().copied());
        self
    }

    /// Mark the rendered file as holding credentials.
    ///
    /// Credential-bearing paths are always written to the variant's ignore
    /// list.
    pub fn credential_bearing(mut self) -> Self {
        self.credential_bearing = true;
        self
    }

    pub fn relative_path(&self) -> &'static str {
        self.relative_path
    }

    pub fn body(&self) -> &'static str {
        self.body
    }

    pub fn required_variables(&self) -> &BTreeSet<&'static str> {
        &self.required_variables
    }

    pub fn is_credential_bearing(&self) -> bool {
        self.credential_bearing
    }

    /// The relative path as a `Path`, rejected if it could leave the project root
    pub fn safe_path(&self) -> Result<&'static Path, CatalogConsistencyError> {
        let path = Path::new(self.relative_path);
        let unsafe_path = || CatalogConsistencyError::UnsafePath {
            path: self.relative_path.to_string(),
        };

        if self.relative_path.is_empty() || self.relative_path.ends_with('/') {
            return Err(unsafe_path());
        }
        for component in path.components() {
            if !matches!(component, Component::Normal(_)) {
                return Err(unsafe_path());
            }
        }
        // `components()` drops interior `.` segments, so check the raw text too
        if self.relative_path.split('/').any(|s| s.is_empty() || s == ".") {
            return Err(unsafe_path());
        }

        Ok(path)
    }

    /// Declared variables and placeholders in the body must be the same set
    pub fn check_placeholders(&self) -> Result<(), CatalogConsistencyError> {
        let used = render::placeholders(self.body);

        if let Some(variable) = used.difference(&self.required_variables).next() {
            return Err(CatalogConsistencyError::UndeclaredPlaceholder {
                path: self.relative_path.to_string(),
                variable: variable.to_string(),
            });
        }
        if let Some(variable) = self.required_variables.difference(&used).next() {
            return Err(CatalogConsistencyError::UnusedVariable {
                path: self.relative_path.to_string(),
                variable: variable.to_string(),
            });
        }

        Ok(())
    }

    /// Whether the body of this (ignore-list) entry excludes `path`
    pub(crate) fn ignores(&self, path: &str) -> bool {
        if self.required_variables.contains(render::CREDENTIAL_IGNORES) {
            return true;
        }
        let rooted = format!("/{}", path);
        self.body
            .lines()
            .map(str::trim)
            .any(|line| line == path || line == rooted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_paths() {
        for path in [".env", "db/migrations/V1__init.sql", "cmd/server/main.go"] {
            assert!(TemplateEntry::new(path, "").safe_path().is_ok(), "{}", path);
        }
    }

    #[test]
    fn test_unsafe_paths_rejected() {
        for path in [
            "",
            "../outside",
            "db/../../outside",
            "/etc/passwd",
            "./.env",
            "db//x.sql",
            "db/",
        ] {
            let err = TemplateEntry::new(path, "").safe_path().unwrap_err();
            assert!(
                matches!(err, CatalogConsistencyError::UnsafePath { .. }),
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_placeholders_must_match_declaration() {
        let ok = TemplateEntry::new("a", "{{projectName}}:{{dbPort}}")
            .requires(&["projectName", "dbPort"]);
        assert!(ok.check_placeholders().is_ok());

        let undeclared = TemplateEntry::new("a", "{{projectName}}:{{dbPort}}").requires(&["projectName"]);
        assert_eq!(
            undeclared.check_placeholders(),
            Err(CatalogConsistencyError::UndeclaredPlaceholder {
                path: "a".to_string(),
                variable: "dbPort".to_string(),
            })
        );

        let unused = TemplateEntry::new("a", "static").requires(&["projectName"]);
        assert!(matches!(
            unused.check_placeholders(),
            Err(CatalogConsistencyError::UnusedVariable { .. })
        ));
    }

    #[test]
    fn test_ignore_coverage() {
        let literal = TemplateEntry::new(".gitignore", "/.env\nflyway.conf\n");
        assert!(literal.ignores(".env"));
        assert!(literal.ignores("flyway.conf"));
        assert!(!literal.ignores("secrets.yaml"));

        let derived = TemplateEntry::new(".gitignore", "{{credentialIgnores}}\n")
            .requires(&["credentialIgnores"]);
        assert!(derived.ignores("secrets.yaml"));
    }
}
