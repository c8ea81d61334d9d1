use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use dub_model::{DeclContent, DeclNode, KlassDecl, Namespace};
use tracing::{debug, warn};

use crate::{Error, Result, read_xml};

const INDEX_FILE: &str = "index.xml";

/// One `<compound>` entry of `index.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRef {
    pub refid: String,
    pub kind: String,
    pub name: String,
}

/// A directory of doxygen XML output.
#[derive(Debug, Clone)]
pub struct DoxygenDir {
    root: PathBuf,
}

impl DoxygenDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compounds listed in `index.xml`, in document order.
    pub fn index(&self) -> Result<Vec<CompoundRef>> {
        let index = read_xml(&self.root.join(INDEX_FILE))?;
        Ok(index
            .children("compound")
            .filter_map(|compound| {
                Some(CompoundRef {
                    refid: compound.attr("refid")?.to_string(),
                    kind: compound.attr("kind")?.to_string(),
                    name: compound.child_text("name").trim().to_string(),
                })
            })
            .collect())
    }

    /// Names of every documented namespace.
    pub fn namespaces(&self) -> Result<Vec<String>> {
        Ok(self
            .index()?
            .into_iter()
            .filter(|c| c.kind == "namespace")
            .map(|c| c.name)
            .collect())
    }

    /// The `compounddef` node stored in `<refid>.xml`.
    pub fn compound(&self, refid: &str) -> Result<DeclNode> {
        let document = read_xml(&self.root.join(format!("{}.xml", refid)))?;
        document
            .children("compounddef")
            .next()
            .cloned()
            .ok_or_else(|| Error::MissingCompound {
                kind: "compounddef".to_string(),
                name: refid.to_string(),
            })
    }

    /// Build the entity graph of one namespace: its public classes, their
    /// public member functions, typedef aliases and free functions.
    ///
    /// Without a name, the first namespace of the index is loaded.
    pub fn load_namespace(&self, name: Option<&str>) -> Result<Rc<Namespace>> {
        let compound = self
            .index()?
            .into_iter()
            .filter(|c| c.kind == "namespace")
            .find(|c| name.is_none_or(|name| c.name == name))
            .ok_or_else(|| Error::MissingCompound {
                kind: "namespace".to_string(),
                name: name.unwrap_or("*").to_string(),
            })?;
        let namespace = self.compound(&compound.refid)?;

        let mut classes = Vec::new();
        for inner in namespace.children("innerclass") {
            if inner.attr("prot").is_some_and(|prot| prot != "public") {
                continue;
            }
            let Some(refid) = inner.attr("refid") else {
                continue;
            };
            if let Some(class) = self.load_class(refid)? {
                classes.push(class);
            }
        }

        for typedef in member_defs(&namespace, "typedef") {
            resolve_alias(&mut classes, typedef);
        }

        let functions = public_functions(&namespace);
        debug!(
            namespace = %compound.name,
            classes = classes.len(),
            functions = functions.len(),
            "loaded namespace"
        );

        Ok(Namespace::new(compound.name, classes, functions))
    }

    fn load_class(&self, refid: &str) -> Result<Option<KlassDecl>> {
        let mut node = self.compound(refid)?;
        let name = short_name(&node.child_text("compoundname"));
        if name.contains('<') {
            debug!(class = %name, "skipping template class");
            return Ok(None);
        }

        let members = public_functions(&node);
        let constants = public_constants(&node);
        debug!(class = %name, members = members.len(), constants = constants.len(), "loaded class");

        // Members now live in `members`; the class node keeps its own metadata.
        node.content
            .retain(|c| !matches!(c, DeclContent::Element(e) if e.tag == "sectiondef"));

        Ok(Some(KlassDecl {
            name,
            node,
            members,
            alias_names: Vec::new(),
            constants,
        }))
    }
}

/// Last `::` segment of a qualified name.
fn short_name(qualified: &str) -> String {
    let qualified = qualified.trim();
    qualified
        .rsplit("::")
        .next()
        .unwrap_or(qualified)
        .to_string()
}

fn member_defs<'a>(compound: &'a DeclNode, kind: &'a str) -> impl Iterator<Item = &'a DeclNode> {
    compound
        .children("sectiondef")
        .flat_map(|section| section.children("memberdef"))
        .filter(move |member| member.attr("kind") == Some(kind))
}

fn public_functions(compound: &DeclNode) -> Vec<DeclNode> {
    member_defs(compound, "function")
        .filter(|member| member.attr("prot").is_none_or(|prot| prot == "public"))
        .cloned()
        .map(strip_void_params)
        .collect()
}

/// Values of the public enums declared in a class.
fn public_constants(compound: &DeclNode) -> Vec<String> {
    member_defs(compound, "enum")
        .filter(|member| member.attr("prot").is_none_or(|prot| prot == "public"))
        .flat_map(|member| member.children("enumvalue"))
        .map(|value| value.child_text("name").trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// `f(void)` declares no parameter.
fn strip_void_params(mut member: DeclNode) -> DeclNode {
    member.content.retain(|c| match c {
        DeclContent::Element(param) if param.tag == "param" => {
            !(param.child_text("type").trim() == "void" && param.child("declname").is_none())
        }
        _ => true,
    });
    member
}

/// Attach `typedef Foo Bar;` to class `Foo` as alias `Bar`.
fn resolve_alias(classes: &mut [KlassDecl], typedef: &DeclNode) {
    let alias = typedef.child_text("name").trim().to_string();
    let target = short_name(&typedef.child_text("type"));

    match classes.iter_mut().find(|class| class.name == target) {
        Some(class) => {
            debug!(%alias, class = %target, "registered alias");
            class.alias_names.push(alias);
        }
        None => {
            let names_compound = typedef
                .child("type")
                .and_then(|ty| ty.child("ref"))
                .is_some_and(|r| r.attr("kindref") == Some("compound"));
            if names_compound {
                warn!(%alias, target = %target, "typedef does not name a bound class");
            }
        }
    }
}
