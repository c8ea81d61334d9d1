use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// Default manifest file name
pub const MANIFEST_FILE: &str = "dub.toml";

/// Represents a dub.toml file with both raw content and parsed manifest.
pub struct DubToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl DubToml {
    /// Open and parse a dub.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Resolve a manifest path against the directory holding dub.toml.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        match self.path.parent() {
            Some(dir) if relative.is_relative() => dir.join(relative),
            _ => relative.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_and_resolve() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "[bindings]\nname = \"mylib\"\ninput = \"xml\"\n").unwrap();

        let file = DubToml::open(&path).unwrap();
        assert_eq!(file.manifest().bindings.name, "mylib");
        assert!(file.content().contains("[bindings]"));
        assert_eq!(
            file.resolve(&file.manifest().bindings.input),
            dir.path().join("xml")
        );
        assert_eq!(file.resolve(Path::new("/abs")), PathBuf::from("/abs"));
    }

    #[test]
    fn test_open_missing() {
        let err = DubToml::open("/nonexistent/dub.toml").err().unwrap();
        assert!(matches!(*err, crate::Error::Io { .. }));
    }
}
