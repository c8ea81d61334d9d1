use std::{path::PathBuf, rc::Rc};

use dub_codegen_lua::ClassGen;
use dub_doxygen::DoxygenDir;
use dub_manifest::{DubToml, Language};
use dub_model::Namespace;
use eyre::{Result, WrapErr};
use tracing::debug;

/// Effective configuration after merging dub.toml and command-line flags.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Namespace to bind; the first one of the index when unset
    pub name: Option<String>,
    pub language: Language,
    pub input: PathBuf,
    pub output: PathBuf,
    pub header_base: Option<String>,
    pub ignore: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: None,
            language: Language::default(),
            input: PathBuf::from("doc/xml"),
            output: PathBuf::from("bind"),
            header_base: None,
            ignore: Vec::new(),
        }
    }
}

impl Settings {
    /// Settings from a manifest, with paths relative to its directory.
    pub fn from_manifest(file: &DubToml) -> Self {
        let bindings = &file.manifest().bindings;
        Self {
            name: Some(bindings.name.clone()),
            language: bindings.language,
            input: file.resolve(&bindings.input),
            output: file.resolve(&bindings.output),
            header_base: bindings.header_base.clone(),
            ignore: bindings.ignore.clone(),
        }
    }

    /// Load the configured namespace from the doxygen XML directory.
    pub fn load_namespace(&self) -> Result<Rc<Namespace>> {
        debug!(input = %self.input.display(), name = ?self.name, "loading doxygen XML");
        DoxygenDir::new(&self.input)
            .load_namespace(self.name.as_deref())
            .wrap_err_with(|| format!("failed to load doxygen XML from '{}'", self.input.display()))
    }

    /// Class generator configured with the ignore list and header base.
    pub fn class_gen(&self) -> ClassGen {
        let class_gen = ClassGen::new().with_ignored(self.ignore.iter().cloned());
        match &self.header_base {
            Some(base) => class_gen.with_header_base(base.clone()),
            None => class_gen,
        }
    }
}
