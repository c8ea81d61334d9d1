//! Target-agnostic code generation traits.

use std::path::Path;

use eyre::Result;

/// Trait for target-specific binding generators.
///
/// Implement this trait to add support for generating bindings for a new
/// scripting runtime.
pub trait LanguageCodegen {
    /// Target identifier (e.g., "lua")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "cpp")
    fn file_extension(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were written, relative to the output directory
    pub written: Vec<String>,
    /// Support files that already existed and were left untouched
    pub skipped: Vec<String>,
    /// Members excluded from the bindings, as `Class::member`
    pub ignored: Vec<String>,
}

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}
