//! `{{name}}` placeholder scanning and substitution

use crate::binder::SubstitutionContext;
use crate::error::CatalogConsistencyError;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Context key holding the ignore-list lines for credential-bearing files
pub const CREDENTIAL_IGNORES: &str = "credentialIgnores";

/// Context keys only credential-bearing entries may reference
pub const CREDENTIAL_VARIABLES: [&str; 2] = ["dbUser", "dbPassword"];

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z][A-Za-z0-9_]*)\}\}").expect("valid regex"));

/// Names of every placeholder referenced in `body`
pub fn placeholders(body: &str) -> BTreeSet<&str> {
    PLACEHOLDER
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Substitute every placeholder in `body` in a single pass.
///
/// Substituted values are not scanned again, and brace text that is not a
/// well-formed placeholder is copied through unchanged.
pub fn render(
    path: &str,
    body: &str,
    ctx: &SubstitutionContext,
) -> Result<String, CatalogConsistencyError> {
    let mut out = String::with_capacity(body.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(body) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = ctx
            .get(name.as_str())
            .ok_or_else(|| CatalogConsistencyError::MissingVariable {
                path: path.to_string(),
                variable: name.as_str().to_string(),
            })?;

        out.push_str(&body[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }

    out.push_str(&body[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SubstitutionContext {
        let mut ctx = SubstitutionContext::default();
        ctx.insert("projectName", "sample-api");
        ctx.insert("dbPort", "5432");
        ctx.insert("nested", "{{projectName}}");
        ctx
    }

    #[test]
    fn test_placeholders_collects_names() {
        let names = placeholders("{{a}} {{b_1}} {{a}} {{ spaced }} {{9bad}} {single}");
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a", "b_1"]);
    }

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let out = render("x", "{{projectName}}:{{dbPort}}/{{projectName}}", &ctx()).unwrap();
        assert_eq!(out, "sample-api:5432/sample-api");
    }

    #[test]
    fn test_render_leaves_other_braces() {
        let body = "mux.HandleFunc(\"GET /users/{id}\", h)\n{{ notAPlaceholder }}\n";
        assert_eq!(render("x", body, &ctx()).unwrap(), body);
    }

    #[test]
    fn test_render_is_single_pass() {
        assert_eq!(render("x", "{{nested}}", &ctx()).unwrap(), "{{projectName}}");
    }

    #[test]
    fn test_render_missing_variable() {
        let err = render(".env", "PORT={{listenPort}}", &ctx()).unwrap_err();
        assert_eq!(
            err,
            CatalogConsistencyError::MissingVariable {
                path: ".env".to_string(),
                variable: "listenPort".to_string(),
            }
        );
    }
}
