//! Per-function Lua wrappers.

use std::cmp::Reverse;

use dub_codegen::CodeBuilder;
use dub_model::{Argument, Error, Function, FunctionGenerator, Parent, Result};

use crate::type_mapper::{LuaType, array_length, lib_name, local_type};

const SELF: &str = "self__";
const RETVAL: &str = "retval__";
const TOP: &str = "top__";

/// Renders one `static int Prefix_name(lua_State *L)` wrapper per function.
#[derive(Debug, Default, Clone, Copy)]
pub struct FunctionGen;

impl FunctionGen {
    pub fn new() -> Self {
        Self
    }

    /// Whether every argument and the return value cross the Lua boundary.
    pub fn is_convertible(&self, function: &Function) -> bool {
        Params::of(function).is_ok()
    }

    /// Render the chooser that forwards to the overload matching the Lua arguments.
    ///
    /// Overloads are tried from the one requiring the most arguments down.
    /// At equal arity, integer parameters are tested before floating ones
    /// since any integer is also a number.
    pub fn dispatcher(&self, overloads: &[&Function]) -> Result<String> {
        let Some(first) = overloads.first() else {
            return Ok(String::new());
        };

        let mut ordered = Vec::with_capacity(overloads.len());
        for &overload in overloads {
            ordered.push((Params::of(overload)?, overload));
        }
        ordered.sort_by_key(|(params, _)| {
            (Reverse(params.required), Reverse(params.integer_tests()))
        });

        let branches: Vec<(String, String)> = ordered
            .iter()
            .map(|(params, overload)| (params.dispatch_condition(), self.method_name(overload, None)))
            .collect();

        let mut b = CodeBuilder::cpp();
        b.push_block_comment(&[&format!("Overloaded function chooser for {}(...)", first.name())]);
        b.push_block(
            &format!("static int {}(lua_State *L) {{", self.method_name(first, Some(0))),
            "}",
            |b| {
                b.push_line(&format!("int {} = lua_gettop(L);", TOP));
                for (i, (condition, target)) in branches.iter().enumerate() {
                    let keyword = if i == 0 { "if" } else { "} else if" };
                    b.push_line(&format!("{} ({}) {{", keyword, condition));
                    b.push_indent()
                        .push_line(&format!("return {}(L);", target))
                        .push_dedent();
                }
                b.push_line("}");
                b.push_line(&format!(
                    "lua_pushstring(L, \"{}: no overload accepts these arguments\");",
                    first.qualified_name()
                ));
                b.push_line("return lua_error(L);");
            },
        );
        Ok(b.build())
    }
}

impl FunctionGenerator for FunctionGen {
    fn function(&self, function: &Function) -> Result<String> {
        let params = Params::of(function)?;

        let signature = function.original_signature();
        let source = function.source().ok();
        let mut comment = vec![signature.as_str()];
        if let Some(source) = source.as_deref() {
            comment.push(source);
        }

        let mut b = CodeBuilder::cpp();
        b.push_block_comment(&comment);
        b.push_block(
            &format!("static int {}(lua_State *L) {{", self.method_name(function, None)),
            "}",
            |b| {
                b.push_line("try {").push_indent();
                if params.has_self {
                    let klass = function.prefix();
                    b.push_line(&format!(
                        "{} *{} = *(({} **)dubL_checkudata(L, 1, \"{}\"));",
                        klass,
                        SELF,
                        klass,
                        lib_name(&params.lib_prefix, klass)
                    ));
                }
                params.push_body(b, function);
                b.push_dedent()
                    .push_line("} catch (std::exception &e) {")
                    .push_indent()
                    .push_line(&format!(
                        "lua_pushfstring(L, \"{}: %s\", e.what());",
                        function.qualified_name()
                    ))
                    .push_dedent()
                    .push_line("} catch (...) {")
                    .push_indent()
                    .push_line(&format!(
                        "lua_pushfstring(L, \"{}: Unknown exception\");",
                        function.qualified_name()
                    ))
                    .push_dedent()
                    .push_line("}");
                b.push_line("return lua_error(L);");
            },
        );
        Ok(b.build())
    }

    /// `<prefix>_<name>` followed by the overload index when it is non-zero.
    ///
    /// An explicit index wins over the function's own; `Some(0)` names the
    /// overload chooser.
    fn method_name(&self, function: &Function, overloaded_index: Option<usize>) -> String {
        match overloaded_index
            .or(function.overloaded_index())
            .filter(|index| *index > 0)
        {
            Some(index) => format!("{}_{}{}", function.prefix(), function.name(), index),
            None => format!("{}_{}", function.prefix(), function.name()),
        }
    }
}

/// Namespace prefix used in registry names of classes the function touches.
fn lib_prefix(function: &Function) -> String {
    match function.parent() {
        Some(Parent::Klass { .. }) => function
            .klass()
            .and_then(|k| k.namespace_name().map(str::to_string))
            .unwrap_or_default(),
        Some(Parent::Namespace { name, .. }) => name.clone(),
        None => String::new(),
    }
}

fn declare(ty: &str, var: &str) -> String {
    if ty.ends_with('*') || ty.ends_with('&') {
        format!("{}{}", ty, var)
    } else {
        format!("{} {}", ty, var)
    }
}

enum Fetch {
    Value(LuaType),
    Array { element: LuaType, length: String },
}

struct Param<'a> {
    arg: &'a Argument,
    var: String,
    index: usize,
    fetch: Fetch,
}

impl Param<'_> {
    fn push_fetch(&self, b: &mut CodeBuilder, lib_prefix: &str) {
        match &self.fetch {
            Fetch::Value(ty) => {
                b.push_line(&ty.check(&self.var, self.index, lib_prefix));
            }
            Fetch::Array { element, length } => {
                b.push_line(&format!("{} {}[{}];", self.arg.base_type(), self.var, length));
                b.push_line(&format!("luaL_checktype(L, {}, LUA_TTABLE);", self.index));
                b.push_block(
                    &format!("for (int i__ = 0; i__ < {}; ++i__) {{", length),
                    "}",
                    |b| {
                        b.push_line(&format!("lua_rawgeti(L, {}, i__ + 1);", self.index));
                        b.push_line(&element.check("v__", -1, lib_prefix));
                        b.push_line(&format!("{}[i__] = v__;", self.var));
                        b.push_line("lua_pop(L, 1);");
                    },
                );
            }
        }
    }

    fn pass(&self) -> String {
        match &self.fetch {
            Fetch::Value(ty) => ty.pass(&self.var),
            Fetch::Array { .. } => self.var.clone(),
        }
    }

    fn test(&self, lib_prefix: &str) -> String {
        match &self.fetch {
            Fetch::Value(ty) => ty.test(self.index, lib_prefix),
            Fetch::Array { .. } => format!("lua_type(L, {}) == LUA_TTABLE", self.index),
        }
    }
}

/// Converted parameters of one function, variadic tail excluded.
struct Params<'a> {
    has_self: bool,
    first_index: usize,
    required: usize,
    vararg: bool,
    list: Vec<Param<'a>>,
    lib_prefix: String,
}

impl<'a> Params<'a> {
    fn of(function: &'a Function) -> Result<Self> {
        let has_self = function.member_method() && !function.constructor() && !function.is_static();
        let first_index = if has_self { 2 } else { 1 };

        let mut list = Vec::new();
        for (offset, arg) in function
            .arguments()
            .iter()
            .filter(|a| !a.is_vararg())
            .enumerate()
        {
            let element = LuaType::of(arg).ok_or_else(|| {
                unsupported(
                    function,
                    format!("argument '{}' has unsupported type '{}'", arg.name(), arg.type_text()),
                )
            })?;
            let fetch = match arg.array_suffix() {
                None => Fetch::Value(element),
                Some(suffix) => {
                    let Some(length) = array_length(suffix) else {
                        return Err(unsupported(
                            function,
                            format!("array argument '{}' has no fixed length '{}'", arg.name(), suffix),
                        ));
                    };
                    match element {
                        LuaType::Boolean | LuaType::Integer(_) | LuaType::Number(_) => Fetch::Array {
                            element,
                            length: length.to_string(),
                        },
                        _ => {
                            return Err(unsupported(
                                function,
                                format!("array argument '{}' must hold scalars", arg.name()),
                            ));
                        }
                    }
                }
            };
            list.push(Param {
                arg,
                var: arg.name(),
                index: first_index + offset,
                fetch,
            });
        }

        if let Some(ret) = function.return_value()
            && LuaType::of(ret).is_none()
        {
            return Err(unsupported(
                function,
                format!("unsupported return type '{}'", ret.type_text()),
            ));
        }

        Ok(Self {
            has_self,
            first_index,
            required: function.required_arguments().min(list.len()),
            vararg: function.vararg(),
            list,
            lib_prefix: lib_prefix(function),
        })
    }

    /// Required parameters checked as integers by the overload chooser.
    fn integer_tests(&self) -> usize {
        self.list[..self.required]
            .iter()
            .filter(|p| matches!(&p.fetch, Fetch::Value(ty) if ty.is_integer()))
            .count()
    }

    /// Stack slot holding the last of `count` arguments.
    fn top_for(&self, count: usize) -> usize {
        self.first_index + count - 1
    }

    fn dispatch_condition(&self) -> String {
        let min = self.top_for(self.required);
        let max = self.top_for(self.list.len());

        let mut conditions = Vec::new();
        if min == max && !self.vararg {
            conditions.push(format!("{} == {}", TOP, min));
        } else {
            if min > 0 {
                conditions.push(format!("{} >= {}", TOP, min));
            }
            if !self.vararg {
                conditions.push(format!("{} <= {}", TOP, max));
            }
        }
        conditions.extend(
            self.list[..self.required]
                .iter()
                .map(|p| p.test(&self.lib_prefix)),
        );

        if conditions.is_empty() {
            "true".to_string()
        } else {
            conditions.join(" && ")
        }
    }

    /// Fetch arguments, call, push the result. Trailing defaults branch on the stack size.
    fn push_body(&self, b: &mut CodeBuilder, function: &Function) {
        let lib_prefix = self.lib_prefix.as_str();
        for param in &self.list[..self.required] {
            param.push_fetch(b, lib_prefix);
        }

        let total = self.list.len();
        if self.required == total {
            self.push_call(b, function, total);
            return;
        }

        b.push_line(&format!("int {} = lua_gettop(L);", TOP));
        for count in (self.required..=total).rev() {
            let header = if count == total {
                format!("if ({} >= {}) {{", TOP, self.top_for(count))
            } else if count == self.required {
                "} else {".to_string()
            } else {
                format!("}} else if ({} >= {}) {{", TOP, self.top_for(count))
            };
            b.push_line(&header).push_indent();
            for param in &self.list[self.required..count] {
                param.push_fetch(b, lib_prefix);
            }
            self.push_call(b, function, count);
            b.push_dedent();
        }
        b.push_line("}");
    }

    fn push_call(&self, b: &mut CodeBuilder, function: &Function, count: usize) {
        let args: Vec<String> = self.list[..count].iter().map(Param::pass).collect();
        let args = args.join(", ");
        let call = if function.constructor() {
            format!("new {}({})", function.name(), args)
        } else if self.has_self {
            format!("{}->{}({})", SELF, function.name(), args)
        } else if function.member_method() {
            format!("{}::{}({})", function.prefix(), function.name(), args)
        } else {
            format!("{}({})", function.name(), args)
        };

        // Unsupported return types were rejected in `Params::of`.
        match function.return_value().and_then(|ret| Some((ret, LuaType::of(ret)?))) {
            None => {
                b.push_line(&format!("{};", call));
                b.push_line("return 0;");
            }
            Some((ret, ty)) => {
                b.push_line(&format!("{} = {};", declare(&local_type(ret), RETVAL), call));
                // Only constructed objects belong to Lua; returned pointers are borrowed.
                let value = match &ty {
                    LuaType::Class {
                        name,
                        by_pointer: true,
                    } if ret.is_const() => format!("const_cast<{} *>({})", name, RETVAL),
                    _ => RETVAL.to_string(),
                };
                b.push_line(&ty.push(&value, &self.lib_prefix, function.constructor()));
                b.push_line("return 1;");
            }
        }
    }
}

fn unsupported(function: &Function, message: String) -> Error {
    Error::Render {
        name: function.qualified_name(),
        location: function.source().unwrap_or_else(|_| "unknown".to_string()),
        message,
    }
}
