use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// Banner placed at the top of every generated binding file.
pub const GENERATED_HEADER: &str = "/**\n *\n * MACHINE GENERATED FILE. DO NOT EDIT.\n *\n */";

/// A file produced by a generator, written under an output directory.
pub trait GeneratedFile {
    /// Location of the file under `base`.
    fn path(&self, base: &Path) -> PathBuf;

    fn rules(&self) -> FileRules;

    fn render(&self) -> String;

    /// Write the file, honouring its overwrite policy. Missing parent
    /// directories are created.
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        if self.rules().overwrite == Overwrite::IfMissing && path.exists() {
            return Ok(WriteResult::Skipped);
        }
        write_file(&path, &self.render())?;
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// The file existed and its rules keep it.
    Skipped,
}

/// How a generated file treats an existing file at its path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl FileRules {
    /// Generated bindings: rewritten on every run.
    pub fn always_overwrite() -> Self {
        Self::default()
    }

    /// Support files the user may customise after the first run.
    pub fn if_missing() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    #[default]
    Always,
    IfMissing,
}
