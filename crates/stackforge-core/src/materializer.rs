//! Writes a variant's rendered templates under a destination root

use crate::binder::SubstitutionContext;
use crate::error::{CatalogConsistencyError, MaterializationError, ScaffoldError};
use crate::project::StackVariant;
use crate::templates::catalog::Catalog;
use crate::templates::render;
use std::path::{Path, PathBuf};
use tokio::fs;

/// One rendered output file
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub relative_path: &'static str,
    pub absolute_path: PathBuf,
    pub content: String,
    pub credential_bearing: bool,
    /// A file already existed at this path and was replaced
    pub overwritten: bool,
}

// Content is left out: credential-bearing files carry the password.
impl std::fmt::Debug for GeneratedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedFile")
            .field("absolute_path", &self.absolute_path)
            .field("bytes", &self.content.len())
            .field("credential_bearing", &self.credential_bearing)
            .field("overwritten", &self.overwritten)
            .finish()
    }
}

/// Renders catalog entries and writes them, one at a time, in catalog order
pub struct ProjectMaterializer<'a> {
    catalog: &'a Catalog,
}

impl<'a> ProjectMaterializer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Render every entry of `variant` without touching the filesystem
    pub fn plan(
        &self,
        variant: StackVariant,
        ctx: &SubstitutionContext,
        root: &Path,
    ) -> Result<Vec<GeneratedFile>, CatalogConsistencyError> {
        self.catalog
            .lookup(variant)
            .iter()
            .map(|entry| {
                let relative = entry.safe_path()?;
                let content = render::render(entry.relative_path(), entry.body(), ctx)?;
                Ok(GeneratedFile {
                    relative_path: entry.relative_path(),
                    absolute_path: root.join(relative),
                    content,
                    credential_bearing: entry.is_credential_bearing(),
                    overwritten: false,
                })
            })
            .collect()
    }

    /// Render and write every entry of `variant` under `root`.
    ///
    /// Existing files are overwritten. A failure stops the run at the failing
    /// entry; files written before it stay on disk.
    pub async fn materialize(
        &self,
        variant: StackVariant,
        ctx: &SubstitutionContext,
        root: &Path,
    ) -> Result<Vec<GeneratedFile>, ScaffoldError> {
        fs::create_dir_all(root)
            .await
            .map_err(|e| MaterializationError::create_dir(root.to_path_buf(), e))?;

        let mut written = Vec::new();

        for entry in self.catalog.lookup(variant) {
            let relative = entry.safe_path()?;
            let target = root.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| MaterializationError::create_dir(parent.to_path_buf(), e))?;
            }

            let content = render::render(entry.relative_path(), entry.body(), ctx)?;
            let overwritten = fs::try_exists(&target).await.unwrap_or(false);

            fs::write(&target, &content)
                .await
                .map_err(|e| MaterializationError::write(target.clone(), e))?;

            written.push(GeneratedFile {
                relative_path: entry.relative_path(),
                absolute_path: target,
                content,
                credential_bearing: entry.is_credential_bearing(),
                overwritten,
            });
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::VariableBinder;
    use crate::config::GeneratorConfig;
    use crate::input::{RawInput, Secret};
    use crate::project::ProjectSpec;
    use crate::templates::catalog::catalog;
    use crate::templates::entry::TemplateEntry;
    use tempfile::TempDir;

    fn context(variant: StackVariant) -> SubstitutionContext {
        let raw = RawInput {
            project_name: "sample-api".to_string(),
            database_name: Some("sampledb".to_string()),
            db_user: "admin".to_string(),
            db_password: Secret::new("secret"),
        };
        let spec = ProjectSpec::from_input(raw, variant).unwrap();
        VariableBinder::new(catalog(), &GeneratorConfig::default())
            .bind(&spec)
            .unwrap()
    }

    #[test]
    fn test_plan_renders_without_writing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("sample-api");
        let ctx = context(StackVariant::RelationalWithCodegen);

        let files = ProjectMaterializer::new(catalog())
            .plan(StackVariant::RelationalWithCodegen, &ctx, &root)
            .unwrap();

        assert!(!root.exists());
        assert_eq!(files.len(), catalog().lookup(StackVariant::RelationalWithCodegen).len());
        assert!(files.iter().all(|f| f.absolute_path.starts_with(&root)));
        assert!(files.iter().all(|f| !f.content.contains("{{")));
    }

    #[tokio::test]
    async fn test_materialize_writes_in_catalog_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("sample-api");
        let ctx = context(StackVariant::RelationalWithCache);

        let files = ProjectMaterializer::new(catalog())
            .materialize(StackVariant::RelationalWithCache, &ctx, &root)
            .await
            .unwrap();

        let expected: Vec<&str> = catalog()
            .lookup(StackVariant::RelationalWithCache)
            .iter()
            .map(TemplateEntry::relative_path)
            .collect();
        let actual: Vec<&str> = files.iter().map(|f| f.relative_path).collect();
        assert_eq!(actual, expected);

        for file in &files {
            assert_eq!(std::fs::read_to_string(&file.absolute_path).unwrap(), file.content);
            assert!(!file.overwritten);
        }
    }

    #[tokio::test]
    async fn test_rerun_marks_overwritten() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("sample-api");
        let ctx = context(StackVariant::GraphWithMigrations);
        let materializer = ProjectMaterializer::new(catalog());

        materializer
            .materialize(StackVariant::GraphWithMigrations, &ctx, &root)
            .await
            .unwrap();
        let second = materializer
            .materialize(StackVariant::GraphWithMigrations, &ctx, &root)
            .await
            .unwrap();

        assert!(second.iter().all(|f| f.overwritten));
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("sample-api");
        // A regular file where the migrations directory has to go
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("db"), "not a directory").unwrap();

        let ctx = context(StackVariant::RelationalWithCodegen);
        let err = ProjectMaterializer::new(catalog())
            .materialize(StackVariant::RelationalWithCodegen, &ctx, &root)
            .await
            .unwrap_err();

        let failure = match err {
            ScaffoldError::Materialization(failure) => failure,
            other => panic!("expected a materialization error, got {:?}", other),
        };
        assert_eq!(failure.path, root.join("db").join("migrations"));

        // Entries before the failing one stay, later ones were never written
        assert!(root.join(".gitignore").exists());
        assert!(root.join(".env").exists());
        assert!(root.join("flyway.conf").exists());
        assert!(!root.join("README.md").exists());
    }

    #[test]
    fn test_debug_omits_content() {
        let ctx = context(StackVariant::RelationalWithCodegen);
        let files = ProjectMaterializer::new(catalog())
            .plan(StackVariant::RelationalWithCodegen, &ctx, Path::new("/x"))
            .unwrap();
        let env = files.iter().find(|f| f.relative_path == ".env").unwrap();
        assert!(env.content.contains("secret"));
        assert!(!format!("{:?}", env).contains("secret"));
    }
}
