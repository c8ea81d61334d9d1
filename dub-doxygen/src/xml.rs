//! roxmltree documents to owned declaration trees.

use std::path::Path;

use dub_model::{DeclContent, DeclNode};

use crate::{Error, Result};

/// Read an XML file and convert its root element.
pub fn read_xml(path: &Path) -> Result<DeclNode> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_xml(&text).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse XML text into a declaration tree rooted at the document element.
pub fn parse_xml(text: &str) -> std::result::Result<DeclNode, roxmltree::Error> {
    let document = roxmltree::Document::parse(text)?;
    Ok(convert(document.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> DeclNode {
    let mut decl = DeclNode::new(node.tag_name().name());
    for attr in node.attributes() {
        decl.attributes
            .insert(attr.name().to_string(), attr.value().to_string());
    }

    for child in node.children() {
        if child.is_element() {
            decl.push_child(convert(child));
        } else if let Some(text) = child.text().filter(|_| child.is_text()) {
            // Indentation between elements carries no meaning.
            if is_layout(text) {
                continue;
            }
            decl.content.push(DeclContent::Text(text.to_string()));
        }
    }
    decl
}

fn is_layout(text: &str) -> bool {
    text.contains('\n') && text.trim().is_empty()
}
