//! Static registry of template entries per stack variant

use super::entry::TemplateEntry;
use super::render::CREDENTIAL_VARIABLES;
use super::variants;
use crate::error::CatalogConsistencyError;
use crate::input::{FieldKind, NameClass};
use crate::project::StackVariant;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Path of the version-control ignore list in every variant
pub const IGNORE_FILE: &str = ".gitignore";

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);
static VERIFIED: LazyLock<Result<(), CatalogConsistencyError>> =
    LazyLock::new(|| CATALOG.verify());

/// The built-in catalog
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// The built-in catalog, after its one-time consistency check
pub fn verified() -> Result<&'static Catalog, CatalogConsistencyError> {
    match &*VERIFIED {
        Ok(()) => Ok(&CATALOG),
        Err(err) => Err(err.clone()),
    }
}

/// Everything one stack variant owns: its input rules and its ordered files
#[derive(Debug, Clone)]
pub struct VariantCatalog {
    variant: StackVariant,
    name_class: NameClass,
    required_fields: BTreeSet<FieldKind>,
    entries: Vec<TemplateEntry>,
}

impl VariantCatalog {
    pub fn new(variant: StackVariant, name_class: NameClass) -> Self {
        Self {
            variant,
            name_class,
            required_fields: BTreeSet::new(),
            entries: Vec::new(),
        }
    }

    pub fn fields(mut self, fields: &[FieldKind]) -> Self {
        self.required_fields.extend(fields.iter().copied());
        self
    }

    pub fn entry(mut self, entry: TemplateEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn variant(&self) -> StackVariant {
        self.variant
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    fn verify(&self) -> Result<(), CatalogConsistencyError> {
        let mut seen = BTreeSet::new();

        for entry in &self.entries {
            entry.safe_path()?;
            entry.check_placeholders()?;

            if !entry.is_credential_bearing() {
                if let Some(variable) = CREDENTIAL_VARIABLES
                    .iter()
                    .find(|v| entry.required_variables().contains(*v))
                {
                    return Err(CatalogConsistencyError::SecretInPlainEntry {
                        variant: self.variant.id().to_string(),
                        path: entry.relative_path().to_string(),
                        variable: variable.to_string(),
                    });
                }
            }

            if !seen.insert(entry.relative_path()) {
                return Err(CatalogConsistencyError::DuplicatePath {
                    variant: self.variant.id().to_string(),
                    path: entry.relative_path().to_string(),
                });
            }
        }

        let ignore_list = self
            .entries
            .iter()
            .find(|e| e.relative_path() == IGNORE_FILE);

        for entry in self.entries.iter().filter(|e| e.is_credential_bearing()) {
            if !ignore_list.is_some_and(|list| list.ignores(entry.relative_path())) {
                return Err(CatalogConsistencyError::CredentialNotIgnored {
                    variant: self.variant.id().to_string(),
                    path: entry.relative_path().to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Variant catalogs are disjoint: a file two variants share is declared in both
#[derive(Debug, Clone)]
pub struct Catalog {
    graph: VariantCatalog,
    relational_codegen: VariantCatalog,
    relational_cache: VariantCatalog,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            graph: variants::graph::catalog(),
            relational_codegen: variants::codegen::catalog(),
            relational_cache: variants::cache::catalog(),
        }
    }

    pub fn variant(&self, variant: StackVariant) -> &VariantCatalog {
        match variant {
            StackVariant::GraphWithMigrations => &self.graph,
            StackVariant::RelationalWithCodegen => &self.relational_codegen,
            StackVariant::RelationalWithCache => &self.relational_cache,
        }
    }

    /// Ordered template entries for `variant`
    pub fn lookup(&self, variant: StackVariant) -> &[TemplateEntry] {
        self.variant(variant).entries()
    }

    pub fn required_fields(&self, variant: StackVariant) -> BTreeSet<FieldKind> {
        self.variant(variant).required_fields.clone()
    }

    pub fn name_class(&self, variant: StackVariant) -> NameClass {
        self.variant(variant).name_class
    }

    /// Paths of the credential-bearing entries of `variant`, in catalog order
    pub fn credential_paths(&self, variant: StackVariant) -> impl Iterator<Item = &'static str> + '_ {
        self.lookup(variant)
            .iter()
            .filter(|e| e.is_credential_bearing())
            .map(TemplateEntry::relative_path)
    }

    /// Check every variant for path safety, placeholder declarations,
    /// duplicate paths and ignore-list coverage
    pub fn verify(&self) -> Result<(), CatalogConsistencyError> {
        for variant in StackVariant::ALL {
            let catalog = self.variant(variant);
            debug_assert_eq!(catalog.variant(), variant);
            catalog.verify()?;
        }
        Ok(())
    }
}
