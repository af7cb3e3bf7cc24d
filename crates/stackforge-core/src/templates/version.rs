//! Catalog version stamps on generated projects

use crate::project::StackVariant;
use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Stamp file written at the root of every generated project
pub const STAMP_FILE: &str = ".stackforge.yaml";

/// Contents of [`STAMP_FILE`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStamp {
    pub variant: String,
    pub catalog_version: String,
}

impl ProjectStamp {
    /// Read the stamp under `root`, `None` if absent or unreadable
    pub async fn read(root: &Path) -> Option<Self> {
        Self::try_read(root).await.ok().flatten()
    }

    async fn try_read(root: &Path) -> Result<Option<Self>> {
        let path = root.join(STAMP_FILE);
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let stamp = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(stamp))
    }

    /// Warnings about regenerating over a project carrying this stamp
    pub fn warnings(&self, variant: StackVariant, catalog_version: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(warning) = check_compatibility(catalog_version, &self.catalog_version) {
            warnings.push(warning);
        }
        if !self.variant.eq_ignore_ascii_case(variant.id()) {
            warnings.push(format!(
                "This project was generated for the '{}' stack; files that '{}' does not produce will be left in place.",
                self.variant,
                variant.id()
            ));
        }

        warnings
    }
}

/// Compare this binary's catalog version against the one a project was generated with.
/// Returns a warning if the project is newer than this binary's catalog.
pub fn check_compatibility(catalog_version: &str, project_version: &str) -> Option<String> {
    let ours = parse_version(catalog_version).ok()?;
    let theirs = parse_version(project_version).ok()?;

    if ours < theirs {
        Some(format!(
            "This project was generated with catalog version {} but this binary ships {}. \
             Consider updating: cargo install stackforge --force",
            project_version, catalog_version
        ))
    } else {
        None
    }
}

/// Parse version string, handling various formats
pub fn parse_version(version_str: &str) -> Result<Version> {
    // Remove leading 'v' if present
    let cleaned = version_str.trim().strip_prefix('v').unwrap_or(version_str.trim());
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}
