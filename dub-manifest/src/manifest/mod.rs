//! Manifest types and parsing for dub.toml files.

mod file;
mod language;
mod parse;

use std::path::PathBuf;

pub use file::{DubToml, MANIFEST_FILE};
pub use language::Language;
use serde::Deserialize;

/// Root manifest for dub.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub bindings: BindingsConfig,
}

/// The `[bindings]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingsConfig {
    /// Namespace to bind, also the Lua library name
    pub name: String,

    /// Target scripting language
    #[serde(default)]
    pub language: Language,

    /// Directory holding the doxygen XML output
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory receiving the generated sources
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Prefix stripped from header paths in `#include` lines
    pub header_base: Option<String>,

    /// Members to leave out, as `Class::member` or bare `member`
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_input() -> PathBuf {
    PathBuf::from("doc/xml")
}

fn default_output() -> PathBuf {
    PathBuf::from("bind")
}
