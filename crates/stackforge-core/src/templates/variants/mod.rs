//! Built-in variant catalogs
//!
//! Payloads live under `templates/<variant>/` in this crate, one `.tmpl` file
//! per output path, and are embedded at compile time.

/// `entry!("dir", "path")` embeds `templates/dir/path.tmpl` as a `TemplateEntry` for `path`
macro_rules! entry {
    ($dir:literal, $path:literal) => {
        $crate::templates::entry::TemplateEntry::new(
            $path,
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/templates/",
                $dir,
                "/",
                $path,
                ".tmpl"
            )),
        )
    };
}

pub(crate) use entry;

pub mod cache;
pub mod codegen;
pub mod graph;
