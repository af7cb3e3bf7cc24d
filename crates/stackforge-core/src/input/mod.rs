//! User input: where it comes from and the rules it must satisfy
//!
//! Prompting itself is behind [`InputSource`]; the core only sees the raw
//! strings a source hands back.

mod secret;
mod source;
mod validate;

pub use secret::Secret;
pub use source::{InputSource, PresetInput, RawInput};
pub use validate::{FieldKind, InputValidator, NameClass, ValidatedValue};
