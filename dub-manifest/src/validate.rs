//! Validation of names that end up in generated C++ identifiers

use dub_core::is_c_identifier;
use miette::SourceSpan;

use crate::{Error, Result};

/// C++ keywords that cannot name a namespace.
const CPP_KEYWORDS: &[&str] = &[
    "auto", "bool", "break", "case", "catch", "char", "class", "const", "continue", "default",
    "delete", "do", "double", "else", "enum", "explicit", "extern", "false", "float", "for",
    "friend", "goto", "if", "inline", "int", "long", "namespace", "new", "operator", "private",
    "protected", "public", "return", "short", "signed", "sizeof", "static", "struct", "switch",
    "template", "this", "throw", "true", "try", "typedef", "typename", "union", "unsigned",
    "using", "virtual", "void", "volatile", "while",
];

/// Source information carried through validation for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Span of a quoted string value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.src, value)
    }

    pub fn validation_error(&self, message: impl Into<String>, value: &str) -> Box<Error> {
        Error::validation(message, self.src, self.filename, self.find_span(value))
    }

    /// Validate a name used as a C identifier (e.g. the namespace name).
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if CPP_KEYWORDS.contains(&name) {
            return Err(Error::reserved_keyword(
                name,
                kind,
                self.src,
                self.filename,
                self.find_span(name),
            ));
        }

        if let Some(reason) = identifier_problem(name) {
            return Err(Error::invalid_identifier(
                name,
                kind,
                reason,
                self.src,
                self.filename,
                self.find_span(name),
            ));
        }

        Ok(())
    }
}

/// Returns None if valid, Some(reason) if invalid
fn identifier_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name cannot be empty")
    } else if !is_c_identifier(name) {
        Some("name is not a valid C identifier")
    } else {
        None
    }
}

/// Find `"value"` in the TOML source, falling back to a bare match.
fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", value);
    if let Some(pos) = src.find(&quoted) {
        // +1 to skip the opening quote
        return Some(SourceSpan::from((pos + 1, value.len())));
    }
    if value.is_empty() {
        return None;
    }
    src.find(value)
        .map(|pos| SourceSpan::from((pos, value.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_problem() {
        assert_eq!(identifier_problem("mylib"), None);
        assert_eq!(identifier_problem("_priv2"), None);
        assert_eq!(identifier_problem(""), Some("name cannot be empty"));
        assert!(identifier_problem("my-lib").is_some());
        assert!(identifier_problem("2lib").is_some());
    }

    #[test]
    fn test_find_value_span() {
        let src = "[bindings]\nname = \"mylib\"\n";
        let span = find_value_span(src, "mylib").unwrap();
        assert_eq!(span.offset(), 19);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_validate_name_keyword() {
        let ctx = ParseContext::new("name = \"class\"", "dub.toml");
        let err = ctx.validate_name("class", "namespace name").unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }
}
