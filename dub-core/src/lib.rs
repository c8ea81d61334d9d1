//! Core utilities and types for the dub binding generator.
//!
//! This crate provides the file writing primitives and string helpers
//! shared by the loader, the entity model and the target generators.

mod file;
mod utils;

// File operations
pub use file::{FileRules, GENERATED_HEADER, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::{is_c_identifier, last_path_segments, unescape_entities};
