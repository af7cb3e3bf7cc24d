//! Template catalog, rendering, and version stamps
//!
//! This module provides:
//! - Template entries and the per-variant catalog (`TemplateEntry`, `Catalog`)
//! - `{{name}}` placeholder rendering
//! - Project stamps for catalog version compatibility checking

pub mod catalog;
pub mod entry;
pub mod render;
pub mod variants;
pub mod version;

use crate::project::StackVariant;
use colored::Colorize;

pub use catalog::{catalog, verified, Catalog, VariantCatalog, IGNORE_FILE};
pub use entry::TemplateEntry;
pub use render::{placeholders, render};
pub use version::{check_compatibility, ProjectStamp, STAMP_FILE};

/// Print every variant with its required fields and ordered output paths
pub fn print_catalog(catalog: &Catalog) {
    println!(
        "{}",
        format!("Stack variants (catalog {})", crate::CATALOG_VERSION)
            .cyan()
            .bold()
    );

    for variant in StackVariant::ALL {
        println!();
        println!(
            "  {} {} - {}",
            variant.id().green().bold(),
            variant.display_name(),
            variant.description().dimmed()
        );

        let fields: Vec<&str> = catalog
            .required_fields(variant)
            .iter()
            .map(|f| f.display_name())
            .collect();
        println!("    {} {}", "asks for:".dimmed(), fields.join(", "));

        for entry in catalog.lookup(variant) {
            if entry.is_credential_bearing() {
                println!(
                    "    {} {} {}",
                    "->".blue(),
                    entry.relative_path(),
                    "(credentials, git-ignored)".yellow()
                );
            } else {
                println!("    {} {}", "->".blue(), entry.relative_path());
            }
        }
    }
}
