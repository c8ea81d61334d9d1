//! Shared code generation utilities for the dub binding generator.
//!
//! This crate provides language-agnostic abstractions and utilities
//! used by target generators (e.g., `dub-codegen-lua`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indent)
//! - [`language`] - Target abstractions (LanguageCodegen, PreviewFile, GenerateResult)
//! - [`members`] - Member list filtering and registration table formatting
//! - [`testing`] - Declaration fixtures and test helpers (feature-gated)

pub mod builder;
pub mod language;
pub mod members;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{CodeBuilder, Indent};
pub use language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use members::{filter_members, registration_entry, registration_table};
