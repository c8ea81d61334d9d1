//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{MANIFEST_FILE, Manifest};
use crate::{Error, ParseContext, Result};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, MANIFEST_FILE)
    }
}

impl Manifest {
    /// Parse a dub.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a dub.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let manifest: Manifest =
        toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
    validate_manifest(&manifest, &ParseContext::new(content, filename))?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &ParseContext<'_>) -> Result<()> {
    let bindings = &manifest.bindings;
    ctx.validate_name(&bindings.name, "namespace name")?;

    for entry in &bindings.ignore {
        let member = entry.rsplit("::").next().unwrap_or(entry);
        if member.trim().is_empty() {
            return Err(ctx.validation_error(
                format!("ignore entry '{}' does not name a member", entry),
                entry,
            ));
        }
    }

    if bindings.header_base.as_deref().is_some_and(|b| b.trim().is_empty()) {
        return Err(ctx.validation_error("header_base cannot be empty", ""));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::Language;

    #[test]
    fn test_full_manifest() {
        let manifest: Manifest = r#"
            [bindings]
            name = "mylib"
            language = "lua"
            input = "doc/xml"
            output = "src/bind"
            header_base = "include"
            ignore = ["Foo::bar", "operator="]
        "#
        .parse()
        .unwrap();

        let bindings = manifest.bindings;
        assert_eq!(bindings.name, "mylib");
        assert_eq!(bindings.language, Language::Lua);
        assert_eq!(bindings.output, PathBuf::from("src/bind"));
        assert_eq!(bindings.header_base.as_deref(), Some("include"));
        assert_eq!(bindings.ignore, vec!["Foo::bar", "operator="]);
    }

    #[test]
    fn test_defaults() {
        let manifest: Manifest = "[bindings]\nname = \"mylib\"\n".parse().unwrap();

        assert_eq!(manifest.bindings.language, Language::Lua);
        assert_eq!(manifest.bindings.input, PathBuf::from("doc/xml"));
        assert_eq!(manifest.bindings.output, PathBuf::from("bind"));
        assert!(manifest.bindings.ignore.is_empty());
    }

    #[test]
    fn test_invalid_name() {
        let err = "[bindings]\nname = \"my-lib\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_unknown_language() {
        let err = "[bindings]\nname = \"mylib\"\nlanguage = \"ruby\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_field() {
        let err = "[bindings]\nname = \"mylib\"\noutput_dir = \"x\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_empty_ignore_entry() {
        let err = "[bindings]\nname = \"mylib\"\nignore = [\"Foo::\"]\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("Foo::"));
    }
}
