//! Builds the substitution context for one run

use crate::config::GeneratorConfig;
use crate::error::CatalogConsistencyError;
use crate::input::Secret;
use crate::project::{ProjectSpec, StackVariant};
use crate::templates::catalog::Catalog;
use crate::templates::render::CREDENTIAL_IGNORES;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
enum ContextValue {
    Plain(String),
    Secret(Secret),
}

impl ContextValue {
    fn as_str(&self) -> &str {
        match self {
            ContextValue::Plain(value) => value,
            ContextValue::Secret(secret) => secret.expose(),
        }
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Plain(value) => write!(f, "{:?}", value),
            ContextValue::Secret(secret) => write!(f, "{:?}", secret),
        }
    }
}

/// Placeholder name to value, built once per run.
///
/// Secret values render into templates but are masked in `Debug` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionContext {
    values: BTreeMap<String, ContextValue>,
}

impl SubstitutionContext {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(name.into(), ContextValue::Plain(value.into()));
    }

    pub fn insert_secret(&mut self, name: impl Into<String>, value: Secret) {
        self.values.insert(name.into(), ContextValue::Secret(value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(ContextValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Merges validated input with generator-derived constants
pub struct VariableBinder<'a> {
    catalog: &'a Catalog,
    config: &'a GeneratorConfig,
}

impl<'a> VariableBinder<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a GeneratorConfig) -> Self {
        Self { catalog, config }
    }

    /// Build the context for `spec` and check it covers every placeholder the
    /// variant's templates need.
    pub fn bind(&self, spec: &ProjectSpec) -> Result<SubstitutionContext, CatalogConsistencyError> {
        let variant = spec.variant();
        let mut ctx = SubstitutionContext::default();

        ctx.insert("projectName", spec.project_name());
        ctx.insert("projectDir", spec.project_dir());
        ctx.insert("dbUser", spec.db_user());
        ctx.insert_secret("dbPassword", spec.db_password().clone());
        ctx.insert("listenPort", self.config.listen_port.to_string());
        ctx.insert("variant", variant.id());
        ctx.insert("catalogVersion", crate::CATALOG_VERSION);

        let ignores: Vec<String> = self
            .catalog
            .credential_paths(variant)
            .map(|path| format!("/{}", path))
            .collect();
        ctx.insert(CREDENTIAL_IGNORES, ignores.join("\n"));

        match variant {
            StackVariant::GraphWithMigrations => {
                let neo4j = &self.config.neo4j;
                ctx.insert("dbScheme", neo4j.scheme.as_str());
                ctx.insert("dbHost", neo4j.host.as_str());
                ctx.insert("dbPort", neo4j.port.to_string());
                ctx.insert(
                    "databaseName",
                    spec.database_name().unwrap_or(neo4j.database.as_str()),
                );
            }
            StackVariant::RelationalWithCodegen | StackVariant::RelationalWithCache => {
                let postgres = &self.config.postgres;
                ctx.insert("dbScheme", "postgres");
                ctx.insert("dbHost", postgres.host.as_str());
                ctx.insert("dbPort", postgres.port.to_string());
                // Required for relational variants, so validation already ensured it
                ctx.insert("databaseName", spec.database_name().unwrap_or_default());
            }
        }

        if variant == StackVariant::RelationalWithCache {
            ctx.insert("cacheHost", self.config.redis.host.as_str());
            ctx.insert("cachePort", self.config.redis.port.to_string());
        }

        self.check(variant, &ctx)?;
        Ok(ctx)
    }

    fn check(
        &self,
        variant: StackVariant,
        ctx: &SubstitutionContext,
    ) -> Result<(), CatalogConsistencyError> {
        for entry in self.catalog.lookup(variant) {
            if let Some(missing) = entry
                .required_variables()
                .iter()
                .find(|name| !ctx.contains(name))
            {
                return Err(CatalogConsistencyError::MissingVariable {
                    path: entry.relative_path().to_string(),
                    variable: missing.to_string(),
                });
            }
        }
        Ok(())
    }
}
