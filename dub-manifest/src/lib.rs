// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod validate;

pub use error::{Error, Result};
pub use manifest::{BindingsConfig, DubToml, Language, MANIFEST_FILE, Manifest};
pub use validate::ParseContext;
