//! Interactive front-end: cliclack prompts feeding the generation pipeline
//!
//! Only built with the `tui` feature. Without it, callers drive
//! [`crate::Pipeline`] with their own [`crate::InputSource`].

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs, PromptInput};
