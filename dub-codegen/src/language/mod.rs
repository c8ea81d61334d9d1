//! Target-specific abstractions.
//!
//! - [`LanguageCodegen`] - Main trait for binding generators
//! - [`GenerateResult`] - Result of code generation
//! - [`PreviewFile`] - Generated file preview

mod traits;

pub use traits::{GenerateResult, LanguageCodegen, PreviewFile};
