//! Test utilities for binding generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::Path;

use dub_model::DeclNode;
use eyre::Result;

/// Builder for doxygen-shaped `memberdef` fixtures.
#[derive(Debug, Clone)]
pub struct MemberDef {
    node: DeclNode,
    name: String,
    return_type: String,
    params: Vec<DeclNode>,
    definition: Option<String>,
    argsstring: Option<String>,
    location: Option<(String, u32)>,
}

impl MemberDef {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            node: DeclNode::new("memberdef")
                .with_attr("kind", "function")
                .with_attr("prot", "public"),
            name: name.into(),
            return_type: return_type.into(),
            params: Vec::new(),
            definition: None,
            argsstring: None,
            location: None,
        }
    }

    /// Add a named parameter.
    pub fn param(self, type_text: &str, name: &str) -> Self {
        self.param_node(
            DeclNode::new("param")
                .with_child(DeclNode::text_node("type", type_text))
                .with_child(DeclNode::text_node("declname", name)),
        )
    }

    /// Add a parameter with a default value.
    pub fn param_default(self, type_text: &str, name: &str, default: &str) -> Self {
        self.param_node(
            DeclNode::new("param")
                .with_child(DeclNode::text_node("type", type_text))
                .with_child(DeclNode::text_node("declname", name))
                .with_child(DeclNode::text_node("defval", default)),
        )
    }

    pub fn param_node(mut self, param: DeclNode) -> Self {
        self.params.push(param);
        self
    }

    pub fn is_static(mut self) -> Self {
        self.node = self.node.with_attr("static", "yes");
        self
    }

    /// Override the `definition` text (defaults to "<return> <name>").
    pub fn definition(mut self, definition: &str) -> Self {
        self.definition = Some(definition.to_string());
        self
    }

    /// Override the `argsstring` text (defaults to the parenthesized params).
    pub fn argsstring(mut self, argsstring: &str) -> Self {
        self.argsstring = Some(argsstring.to_string());
        self
    }

    pub fn location(mut self, file: &str, line: u32) -> Self {
        self.location = Some((file.to_string(), line));
        self
    }

    pub fn build(self) -> DeclNode {
        let definition = self
            .definition
            .unwrap_or_else(|| format!("{} {}", self.return_type, self.name).trim().to_string());
        let argsstring = self.argsstring.unwrap_or_else(|| {
            let params: Vec<String> = self
                .params
                .iter()
                .map(|p| format!("{} {}", p.child_text("type"), p.child_text("declname")).trim().to_string())
                .collect();
            format!("({})", params.join(", "))
        });

        let mut node = self
            .node
            .with_child(DeclNode::text_node("type", self.return_type))
            .with_child(DeclNode::text_node("definition", definition))
            .with_child(DeclNode::text_node("argsstring", argsstring))
            .with_child(DeclNode::text_node("name", self.name));
        for param in self.params {
            node.push_child(param);
        }
        if let Some((file, line)) = self.location {
            node.push_child(
                DeclNode::new("location")
                    .with_attr("file", file)
                    .with_attr("line", line.to_string()),
            );
        }
        node
    }
}

/// Compound node of a class declared in `header`.
pub fn compound(name: &str, header: &str) -> DeclNode {
    DeclNode::new("compounddef")
        .with_attr("kind", "class")
        .with_child(DeclNode::text_node("compoundname", name))
        .with_child(DeclNode::new("location").with_attr("file", header).with_attr("line", "1"))
}

/// Assert that two strings are equal, with a nice diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        // Simple line-by-line diff
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate code into a temporary directory and return the path.
///
/// The directory will be cleaned up when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_def_shape() {
        let node = MemberDef::new("bar", "int")
            .param("int", "x")
            .param_default("double", "y", "1.0")
            .location("/src/lib/include/foo.h", 12)
            .build();

        assert_eq!(node.child_text("name"), "bar");
        assert_eq!(node.child_text("definition"), "int bar");
        assert_eq!(node.child_text("argsstring"), "(int x, double y)");
        assert_eq!(node.children("param").count(), 2);
        assert_eq!(node.child("location").unwrap().attr("line"), Some("12"));
    }

    #[test]
    fn test_assert_content_eq_passes_on_equal() {
        assert_content_eq("a\nb", "a\nb");
    }

    #[test]
    #[should_panic(expected = "Line 2")]
    fn test_assert_content_eq_reports_line() {
        assert_content_eq("a\nb", "a\nc");
    }
}
