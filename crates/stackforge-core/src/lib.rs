//! Stackforge Core - template-driven generation engine for backend service skeletons
//!
//! Given a project name, database credentials and a stack variant, this library
//! renders the variant's fixed template catalog and writes the resulting tree.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Engine** - `InputValidator`, the static `Catalog`, `VariableBinder`
//!   and `ProjectMaterializer`
//! - **Layer 2: Run orchestration** - `Pipeline` and its `RunState` machine, fed by
//!   any `InputSource`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use stackforge_core::{GeneratorConfig, Pipeline, PresetInput, FieldKind, StackVariant};
//!
//! let mut input = PresetInput::new()
//!     .with(FieldKind::ProjectName, "sample-api")
//!     .with(FieldKind::DatabaseName, "sampledb")
//!     .with(FieldKind::DbUser, "admin")
//!     .with(FieldKind::DbPassword, "secret");
//!
//! let report = Pipeline::new(GeneratorConfig::default())
//!     .run_with_source(&mut input, StackVariant::RelationalWithCodegen, ".".as_ref())
//!     .await?;
//! ```

pub mod binder;
pub mod config;
pub mod error;
pub mod input;
pub mod materializer;
pub mod pipeline;
pub mod project;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use binder::{SubstitutionContext, VariableBinder};
pub use config::GeneratorConfig;
pub use error::{CatalogConsistencyError, MaterializationError, ScaffoldError, ValidationError};
pub use input::{FieldKind, InputSource, InputValidator, PresetInput, RawInput, Secret};
pub use materializer::{GeneratedFile, ProjectMaterializer};
pub use pipeline::{GenerationReport, Pipeline, RunState};
pub use project::{ProjectSpec, StackVariant};
pub use templates::{Catalog, TemplateEntry};

#[cfg(feature = "tui")]
pub use tui::run;

/// Version of the built-in template catalog, recorded in every generated project
pub const CATALOG_VERSION: &str = "1.0.0";
