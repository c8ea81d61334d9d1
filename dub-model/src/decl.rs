//! Opaque declaration tree consumed by the entity model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One node of a parsed declaration (a `memberdef`, `param`, `type`, ...).
///
/// Content is kept in document order so mixed markup such as
/// `<type>const <ref>Foo</ref> *</type>` flattens back to `const Foo *`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<DeclContent>,
}

/// A text run or a child element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclContent {
    Text(String),
    Element(DeclNode),
}

impl DeclNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Shorthand for an element holding a single text run.
    pub fn text_node(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag).with_text(text)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(DeclContent::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: DeclNode) -> Self {
        self.content.push(DeclContent::Element(child));
        self
    }

    /// Append a child element in place.
    pub fn push_child(&mut self, child: DeclNode) {
        self.content.push(DeclContent::Element(child));
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Direct child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &DeclNode> {
        self.content.iter().filter_map(|c| match c {
            DeclContent::Element(node) => Some(node),
            DeclContent::Text(_) => None,
        })
    }

    /// Direct children with the given tag, in document order.
    pub fn children<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a DeclNode> {
        self.elements().filter(move |node| node.tag == tag)
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&DeclNode> {
        self.children(tag).next()
    }

    /// Text of the first direct child with the given tag, empty when absent.
    pub fn child_text(&self, tag: &str) -> String {
        self.child(tag).map(DeclNode::text).unwrap_or_default()
    }

    /// Concatenated text of the whole subtree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for content in &self.content {
            match content {
                DeclContent::Text(text) => out.push_str(text),
                DeclContent::Element(node) => node.collect_text(out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param() -> DeclNode {
        DeclNode::new("param")
            .with_child(
                DeclNode::new("type")
                    .with_text("const ")
                    .with_child(DeclNode::text_node("ref", "Foo").with_attr("kindref", "compound"))
                    .with_text(" &"),
            )
            .with_child(DeclNode::text_node("declname", "foo"))
    }

    #[test]
    fn test_text_flattens_mixed_content() {
        let node = param();
        assert_eq!(node.child_text("type"), "const Foo &");
        assert_eq!(node.text(), "const Foo &foo");
    }

    #[test]
    fn test_children_keep_document_order() {
        let node = DeclNode::new("memberdef")
            .with_child(DeclNode::text_node("param", "a"))
            .with_child(DeclNode::text_node("name", "x"))
            .with_child(DeclNode::text_node("param", "b"));

        let params: Vec<String> = node.children("param").map(DeclNode::text).collect();
        assert_eq!(params, vec!["a", "b"]);
        assert_eq!(node.child_text("name"), "x");
        assert_eq!(node.child_text("missing"), "");
    }

    #[test]
    fn test_attr_lookup() {
        let node = DeclNode::new("location")
            .with_attr("file", "/a/b/c.h")
            .with_attr("line", "3");
        assert_eq!(node.attr("file"), Some("/a/b/c.h"));
        assert_eq!(node.attr("column"), None);
    }

    #[test]
    fn test_deserialize_from_json_fixture() {
        let node: DeclNode = serde_json::from_str(
            r#"{
                "tag": "param",
                "content": [
                    { "tag": "type", "content": ["int"] },
                    { "tag": "declname", "content": ["x"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(node.child_text("type"), "int");
        assert_eq!(node.child_text("declname"), "x");
    }
}
