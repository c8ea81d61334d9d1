use std::path::{Path, PathBuf};

use dub_core::{FileRules, GeneratedFile};

/// A rendered `.cpp` binding source, rewritten on every run.
pub struct BindingCpp {
    pub stem: String,
    pub content: String,
}

impl BindingCpp {
    pub fn new(stem: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            content: content.into(),
        }
    }

    /// `<namespace>_<class>`, or the bare class name outside any namespace.
    pub fn class_stem(namespace: Option<&str>, class: &str) -> String {
        match namespace {
            Some(namespace) => format!("{}_{}", namespace, class),
            None => class.to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.cpp", self.stem)
    }
}

impl GeneratedFile for BindingCpp {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}
