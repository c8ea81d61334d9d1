//! List command report data structures.

use super::output::{Output, Report};

/// What the bindings of a namespace contain.
#[derive(Debug)]
pub struct ListReport {
    pub namespace: String,
    pub classes: Vec<ClassInfo>,
    /// Bound free functions.
    pub functions: Vec<String>,
    /// Members left out, as `Class::member` with the reason.
    pub ignored: Vec<(String, String)>,
}

/// One class and its bound members.
#[derive(Debug)]
pub struct ClassInfo {
    pub name: String,
    pub aliases: Vec<String>,
    /// Identifier of the constructor wrapper, if the class can be constructed.
    pub constructor: Option<String>,
    /// Bound members, one entry per overload group.
    pub members: Vec<String>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.namespace);

        for class in &self.classes {
            out.newline();
            out.section(&class.name);
            if !class.aliases.is_empty() {
                out.key_value_indented("aliases", &class.aliases.join(", "));
            }
            out.key_value_indented(
                "constructor",
                class.constructor.as_deref().unwrap_or("(none)"),
            );
            for member in &class.members {
                out.list_item(member);
            }
        }

        if !self.functions.is_empty() {
            out.newline();
            out.section("Functions");
            for function in &self.functions {
                out.list_item(function);
            }
        }

        if !self.ignored.is_empty() {
            out.newline();
            out.section("Ignored");
            for (name, reason) in &self.ignored {
                out.excluded_item(name, reason);
            }
        }
    }
}
