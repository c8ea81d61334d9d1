//! Class and namespace binding files.

use std::{fmt, rc::Rc};

use dub_codegen::{CodeBuilder, filter_members, registration_entry, registration_table};
use dub_core::{GENERATED_HEADER, last_path_segments};
use dub_model::{Function, FunctionGenerator, Generator, Klass, MemberNode, Namespace, Result};
use tracing::debug;

use crate::FunctionGen;

/// Global table used when a class has no namespace.
const GLOBAL_TABLE: &str = "_G";

/// Why a member is left out of the bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Destructor,
    Operator,
    TemplateReturn,
    NativePointerReturn,
    TemplateSignature,
    /// An argument or the return value has no Lua conversion.
    UnsupportedType,
    Configured,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            IgnoreReason::Destructor => "destructor",
            IgnoreReason::Operator => "operator",
            IgnoreReason::TemplateReturn => "template return type",
            IgnoreReason::NativePointerReturn => "returns a native pointer",
            IgnoreReason::TemplateSignature => "template in signature",
            IgnoreReason::UnsupportedType => "unsupported argument or return type",
            IgnoreReason::Configured => "ignored in configuration",
        };
        f.write_str(reason)
    }
}

/// Lua class generator: one `.cpp` file per class, one per namespace.
#[derive(Debug, Default)]
pub struct ClassGen {
    function_gen: Rc<FunctionGen>,
    ignored: Vec<String>,
    header_base: Option<String>,
}

impl ClassGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra members to leave out, as `Class::member` or bare `member`.
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Directory that `#include` paths are made relative to (e.g. "include").
    pub fn with_header_base(mut self, base: impl Into<String>) -> Self {
        self.header_base = Some(base.into());
        self
    }

    /// Exclusion rule applied to every member, wherever lists are filtered.
    pub fn ignore_reason(&self, member: &Function) -> Option<IgnoreReason> {
        let name = member.name();
        if name.starts_with('~') {
            Some(IgnoreReason::Destructor)
        } else if name.starts_with("operator") {
            Some(IgnoreReason::Operator)
        } else if member.return_type().is_some_and(|ty| ty.ends_with('>')) {
            Some(IgnoreReason::TemplateReturn)
        } else if member.return_type_is_native_pointer() {
            Some(IgnoreReason::NativePointerReturn)
        } else if member.original_signature().contains('>') {
            Some(IgnoreReason::TemplateSignature)
        } else if !self.function_gen.is_convertible(member) {
            Some(IgnoreReason::UnsupportedType)
        } else if self
            .ignored
            .iter()
            .any(|ignored| *ignored == name || *ignored == member.qualified_name())
        {
            Some(IgnoreReason::Configured)
        } else {
            None
        }
    }

    pub fn ignore_member(&self, member: &Function) -> bool {
        self.ignore_reason(member).is_some()
    }

    /// Members that get bindings, groups kept. `None` when nothing is left.
    pub fn members_list<'a>(
        &self,
        all: &'a [MemberNode<Function>],
    ) -> Option<Vec<MemberNode<&'a Function>>> {
        filter_members(all, &|member: &Function| self.ignore_member(member))
    }

    /// Constructors that get bindings.
    pub fn constructors<'a>(&self, klass: &'a Klass) -> Vec<&'a Function> {
        klass
            .constructors()
            .iter()
            .filter(|ctor| !self.ignore_member(ctor))
            .collect()
    }

    /// Entries of the per-instance method table, including the string
    /// conversion and garbage collection hooks.
    pub fn method_registration(&self, klass: &Klass) -> Result<String> {
        let mut entries = match self.members_list(klass.members()) {
            Some(list) => registration_entries(&list)?,
            None => Vec::new(),
        };
        entries.push(registration_entry("__tostring", &klass.tostring_name()));
        entries.push(registration_entry("__gc", &klass.destructor_name()));
        Ok(registration_table(entries))
    }

    /// Entries of the namespace table: the class name and every alias map to
    /// the constructor. Empty when the class cannot be constructed.
    pub fn namespace_methods_registration(&self, klass: &Klass) -> Result<String> {
        let Some(constructor) = self.constructors(klass).first().copied() else {
            debug!(class = klass.name(), "no constructor to register");
            return Ok(String::new());
        };

        let identifier = constructor.method_name(Some(0))?;
        let entries = std::iter::once(klass.name())
            .chain(klass.alias_names().iter().map(String::as_str))
            .map(|name| registration_entry(name, &identifier));
        Ok(registration_table(entries))
    }

    /// `#include` path for a header, relative to the configured base.
    pub fn header_include(&self, header: &str) -> String {
        if let Some(base) = &self.header_base {
            let base = base.trim_matches('/');
            let marker = format!("/{}/", base);
            if let Some(pos) = header.rfind(&marker) {
                return header[pos + marker.len()..].to_string();
            }
            if let Some(rest) = header.strip_prefix(&format!("{}/", base)) {
                return rest.to_string();
            }
        }
        last_path_segments(header, 1)
    }

    fn push_members(&self, b: &mut CodeBuilder, list: &[MemberNode<&Function>]) -> Result<()> {
        for node in list {
            match node {
                MemberNode::Leaf(function) => {
                    b.push_lines(&function.render()?).push_blank();
                }
                MemberNode::Group(_) => {
                    let overloads: Vec<&Function> = node.leaves().into_iter().copied().collect();
                    self.push_overloads(b, &overloads)?;
                }
            }
        }
        Ok(())
    }

    fn push_overloads(&self, b: &mut CodeBuilder, overloads: &[&Function]) -> Result<()> {
        for function in overloads {
            b.push_lines(&function.render()?).push_blank();
        }
        b.push_lines(&self.function_gen.dispatcher(overloads)?)
            .push_blank();
        Ok(())
    }

    fn log_ignored<'a>(&self, functions: impl Iterator<Item = &'a Function>) {
        for function in functions {
            if let Some(reason) = self.ignore_reason(function) {
                debug!(member = %function.qualified_name(), %reason, "skipping member");
            }
        }
    }

    fn push_hooks(&self, b: &mut CodeBuilder, klass: &Klass) {
        let name = klass.name();
        let lib_name = klass.lib_name();
        let userdata = format!(
            "DubUserdata *userdata = (DubUserdata *)luaL_checkudata(L, 1, \"{}\");",
            lib_name
        );

        b.push_block(
            &format!("static int {}(lua_State *L) {{", klass.destructor_name()),
            "}",
            |b| {
                b.push_line(&userdata)
                    .push_line(&format!(
                        "if (userdata->gc && userdata->ptr) delete ({} *)userdata->ptr;",
                        name
                    ))
                    .push_line("userdata->ptr = NULL;")
                    .push_line("return 0;");
            },
        );
        b.push_blank();

        b.push_block(
            &format!("static int {}(lua_State *L) {{", klass.tostring_name()),
            "}",
            |b| {
                b.push_line(&userdata);
                b.push_block("if (!userdata->ptr) {", "}", |b| {
                    b.push_line(&format!("lua_pushstring(L, \"<{}: NULL>\");", lib_name))
                        .push_line("return 1;");
                });
                b.push_line(&format!(
                    "lua_pushfstring(L, \"<{}: %p>\", userdata->ptr);",
                    lib_name
                ))
                .push_line("return 1;");
            },
        );
        b.push_blank();
    }

    /// `{ "NAME", Class::NAME }` rows for the class enum values.
    fn push_constants(&self, b: &mut CodeBuilder, klass: &Klass) {
        let name = klass.name();
        b.push_line(&format!("static const struct dub_const_Reg {}_const[] = {{", name));
        let entries = klass
            .constants()
            .iter()
            .map(|constant| registration_entry(constant, &format!("{}::{}", name, constant)));
        b.push_indent()
            .push_lines(&format!("{},", registration_table(entries)))
            .push_line("{ NULL, 0 },")
            .push_dedent();
        b.push_line("};").push_blank();
    }
}

impl Generator for ClassGen {
    fn klass(&self, klass: &Klass) -> Result<String> {
        let name = klass.name();
        self.log_ignored(klass.functions());

        let mut b = CodeBuilder::cpp();
        b.push_lines(&banner(&format!("Bindings for class {}", name)));
        b.push_line("#include \"dub/dub.h\"");
        if let Some(header) = klass.header() {
            b.push_line(&format!("#include \"{}\"", self.header_include(header)));
        }
        b.push_blank();
        if let Some(namespace) = klass.namespace_name() {
            b.push_line(&format!("using namespace {};", namespace))
                .push_blank();
        }

        let constructors = self.constructors(klass);
        match constructors.as_slice() {
            [] => {}
            [single] if single.overloaded_index().is_none() => {
                b.push_lines(&single.render()?).push_blank();
            }
            overloads => self.push_overloads(&mut b, overloads)?,
        }

        self.push_hooks(&mut b, klass);

        if let Some(list) = self.members_list(klass.members()) {
            self.push_members(&mut b, &list)?;
        }

        b.push_line(&format!("static const struct luaL_Reg {}_member_methods[] = {{", name));
        let mut methods = self.method_registration(klass)?;
        methods.push_str(",\n");
        methods.push_str(&registration_entry("deleted", "dub_isDeleted"));
        push_table_body(&mut b, &methods);
        b.push_line("};").push_blank();

        let has_constants = !klass.constants().is_empty();
        if has_constants {
            self.push_constants(&mut b, klass);
        }

        b.push_line(&format!(
            "static const struct luaL_Reg {}_namespace_methods[] = {{",
            name
        ));
        push_table_body(&mut b, &self.namespace_methods_registration(klass)?);
        b.push_line("};").push_blank();

        let lib_name = klass.lib_name();
        b.push_block(
            &format!(
                "extern \"C\" int luaopen_{}(lua_State *L) {{",
                open_name(&lib_name)
            ),
            "}",
            |b| {
                b.push_line("// Create the metatable which will contain all the member methods")
                    .push_line(&format!("luaL_newmetatable(L, \"{}\");", lib_name))
                    .push_blank()
                    .push_line("// metatable.__index = metatable (find methods in the table itself)")
                    .push_line("lua_pushvalue(L, -1);")
                    .push_line("lua_setfield(L, -2, \"__index\");")
                    .push_blank();
                if has_constants {
                    b.push_line("// register class constants")
                        .push_line(&format!("dub_register_const(L, {}_const);", name))
                        .push_blank();
                }
                b.push_line("// register member methods")
                    .push_line(&format!("luaL_register(L, NULL, {}_member_methods);", name))
                    .push_blank()
                    .push_line("// register class methods in the namespace table")
                    .push_line(&format!(
                        "luaL_register(L, \"{}\", {}_namespace_methods);",
                        klass.namespace_name().unwrap_or(GLOBAL_TABLE),
                        name
                    ))
                    .push_line("return 1;");
            },
        );

        Ok(b.build())
    }

    fn namespace(&self, namespace: &Namespace) -> Result<String> {
        let name = namespace.name();
        let list = self.members_list(namespace.functions()).unwrap_or_default();
        self.log_ignored(namespace.functions().iter().flat_map(MemberNode::leaves));

        let mut headers: Vec<String> = Vec::new();
        for function in list.iter().flat_map(MemberNode::leaves) {
            if let Some(file) = function.node().child("location").and_then(|l| l.attr("file")) {
                let include = self.header_include(file);
                if !headers.contains(&include) {
                    headers.push(include);
                }
            }
        }

        let mut b = CodeBuilder::cpp();
        b.push_lines(&banner(&format!("Bindings for namespace {}", name)));
        b.push_line("#include \"dub/dub.h\"");
        for header in &headers {
            b.push_line(&format!("#include \"{}\"", header));
        }
        b.push_blank()
            .push_line(&format!("using namespace {};", name))
            .push_blank();

        self.push_members(&mut b, &list)?;

        b.push_line(&format!("static const struct luaL_Reg {}_functions[] = {{", name));
        push_table_body(&mut b, &registration_table(registration_entries(&list)?));
        b.push_line("};").push_blank();

        b.push_block(
            &format!("extern \"C\" int luaopen_{}(lua_State *L) {{", open_name(name)),
            "}",
            |b| {
                b.push_line(&format!("luaL_register(L, \"{}\", {}_functions);", name, name))
                    .push_line("return 1;");
            },
        );

        Ok(b.build())
    }

    fn function_generator(&self) -> Rc<dyn FunctionGenerator> {
        self.function_gen.clone()
    }
}

/// One entry per member: the chooser for groups, the function itself otherwise.
fn registration_entries(list: &[MemberNode<&Function>]) -> Result<Vec<String>> {
    let mut entries = Vec::with_capacity(list.len());
    for node in list {
        let Some(function) = node.first() else {
            continue;
        };
        let index = node.is_group().then_some(0);
        entries.push(registration_entry(
            function.name(),
            &function.method_name(index)?,
        ));
    }
    Ok(entries)
}

fn push_table_body(b: &mut CodeBuilder, table: &str) {
    b.push_indent();
    if !table.is_empty() {
        b.push_lines(&format!("{},", table));
    }
    b.push_line("{ NULL, NULL },").push_dedent();
}

/// Generated-file banner followed by a subject line.
fn banner(subject: &str) -> String {
    format!(
        "{}\n * {}\n *\n * This file has been generated by dub {}.\n */",
        GENERATED_HEADER.trim_end_matches(" */").trim_end(),
        subject,
        env!("CARGO_PKG_VERSION")
    )
}

/// `luaopen_` suffix for a registry name ("mylib.Foo" -> "mylib_Foo").
fn open_name(lib_name: &str) -> String {
    lib_name.replace('.', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_include() {
        let plain = ClassGen::new();
        assert_eq!(plain.header_include("/src/proj/include/mylib/foo.h"), "foo.h");

        let based = ClassGen::new().with_header_base("include");
        assert_eq!(based.header_include("/src/proj/include/mylib/foo.h"), "mylib/foo.h");
        assert_eq!(based.header_include("include/foo.h"), "foo.h");
        assert_eq!(based.header_include("/elsewhere/foo.h"), "foo.h");
    }

    #[test]
    fn test_banner() {
        let banner = banner("Bindings for class Foo");
        assert!(banner.starts_with("/**\n *\n * MACHINE GENERATED FILE. DO NOT EDIT.\n *\n * Bindings"));
        assert!(banner.ends_with(".\n */"));
    }

    #[test]
    fn test_open_name() {
        assert_eq!(open_name("mylib.Foo"), "mylib_Foo");
        assert_eq!(open_name("Foo"), "Foo");
    }

    #[test]
    fn test_ignore_reason_display() {
        assert_eq!(IgnoreReason::NativePointerReturn.to_string(), "returns a native pointer");
        assert_eq!(
            IgnoreReason::UnsupportedType.to_string(),
            "unsupported argument or return type"
        );
    }
}
