//! Conversions between C++ argument types and the Lua stack.

use std::fmt::Display;

use dub_model::Argument;

/// Words dropped from a declared type when declaring a local variable.
const STORAGE_WORDS: &[&str] = &["virtual", "static", "inline", "explicit"];

const INTEGER_TYPES: &[&str] = &[
    "char",
    "signed char",
    "unsigned char",
    "short",
    "unsigned short",
    "int",
    "signed",
    "signed int",
    "unsigned",
    "unsigned int",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "size_t",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
];

/// How a value crosses the Lua boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LuaType {
    Boolean,
    Integer(String),
    Number(String),
    String,
    StdString,
    /// Userdata wrapping a class instance. `by_pointer` is false for values and references.
    Class {
        name: String,
        by_pointer: bool,
    },
}

impl LuaType {
    /// Classify an argument, `None` when the bridge cannot convert it.
    pub(crate) fn of(arg: &Argument) -> Option<Self> {
        let base = arg.base_type();
        let pointers = arg.type_text().matches('*').count();

        if arg.is_string() {
            return Some(LuaType::String);
        }
        if base == "std::string" && pointers == 0 {
            return Some(LuaType::StdString);
        }
        if arg.is_native() {
            if pointers > 0 {
                return None;
            }
            return Some(match base.as_str() {
                "bool" => LuaType::Boolean,
                "float" | "double" | "long double" => LuaType::Number(base),
                b if INTEGER_TYPES.contains(&b) => LuaType::Integer(base),
                _ => return None,
            });
        }
        if base == "void" || pointers > 1 || base.contains('<') {
            return None;
        }
        Some(LuaType::Class {
            name: base,
            by_pointer: pointers == 1,
        })
    }

    /// Statement declaring `var` from stack slot `index`.
    pub(crate) fn check(&self, var: &str, index: impl Display, lib_prefix: &str) -> String {
        match self {
            LuaType::Boolean => format!("bool {} = lua_toboolean(L, {});", var, index),
            LuaType::Integer(base) => {
                format!("{} {} = ({})luaL_checkinteger(L, {});", base, var, base, index)
            }
            LuaType::Number(base) => {
                format!("{} {} = ({})luaL_checknumber(L, {});", base, var, base, index)
            }
            LuaType::String => format!("const char *{} = luaL_checkstring(L, {});", var, index),
            LuaType::StdString => format!("std::string {}(luaL_checkstring(L, {}));", var, index),
            LuaType::Class { name, .. } => format!(
                "{} *{} = *(({} **)dubL_checkudata(L, {}, \"{}\"));",
                name,
                var,
                name,
                index,
                lib_name(lib_prefix, name)
            ),
        }
    }

    /// Expression passing the local `var` to the C++ call.
    pub(crate) fn pass(&self, var: &str) -> String {
        match self {
            LuaType::Class {
                by_pointer: false, ..
            } => format!("*{}", var),
            _ => var.to_string(),
        }
    }

    /// Statement pushing `expr` onto the Lua stack.
    ///
    /// `owned` marks class pointers Lua must delete when collected. Values
    /// are always copied and owned.
    pub(crate) fn push(&self, expr: &str, lib_prefix: &str, owned: bool) -> String {
        match self {
            LuaType::Boolean => format!("lua_pushboolean(L, {});", expr),
            LuaType::Integer(_) => format!("lua_pushinteger(L, {});", expr),
            LuaType::Number(_) => format!("lua_pushnumber(L, {});", expr),
            LuaType::String => format!("lua_pushstring(L, {});", expr),
            LuaType::StdString => format!("lua_pushstring(L, {}.c_str());", expr),
            LuaType::Class {
                name,
                by_pointer: true,
            } => format!(
                "dub_pushudata(L, {}, \"{}\", {});",
                expr,
                lib_name(lib_prefix, name),
                owned
            ),
            LuaType::Class {
                name,
                by_pointer: false,
            } => format!(
                "dub_pushudata(L, new {}({}), \"{}\", true);",
                name,
                expr,
                lib_name(lib_prefix, name)
            ),
        }
    }

    pub(crate) fn is_integer(&self) -> bool {
        matches!(self, LuaType::Integer(_))
    }

    /// Condition true when stack slot `index` holds a compatible value.
    pub(crate) fn test(&self, index: impl Display, lib_prefix: &str) -> String {
        match self {
            LuaType::Boolean => format!("lua_type(L, {}) == LUA_TBOOLEAN", index),
            LuaType::Integer(_) => format!("dub_isinteger(L, {})", index),
            LuaType::Number(_) => format!("lua_type(L, {}) == LUA_TNUMBER", index),
            LuaType::String | LuaType::StdString => {
                format!("lua_type(L, {}) == LUA_TSTRING", index)
            }
            LuaType::Class { name, .. } => format!(
                "dubL_testudata(L, {}, \"{}\")",
                index,
                lib_name(lib_prefix, name)
            ),
        }
    }
}

/// Registry name of a class type (e.g. "mylib.Bar" for `mylib::Bar`).
pub(crate) fn lib_name(lib_prefix: &str, class_name: &str) -> String {
    let short = class_name.rsplit("::").next().unwrap_or(class_name);
    if lib_prefix.is_empty() {
        short.to_string()
    } else {
        format!("{}.{}", lib_prefix, short)
    }
}

/// Element count of a one-dimensional array suffix (`[3]` -> `3`).
///
/// Unsized (`[]`) and multi-dimensional suffixes have no count.
pub(crate) fn array_length(suffix: &str) -> Option<&str> {
    let length = suffix.trim().strip_prefix('[')?.strip_suffix(']')?.trim();
    if length.is_empty() || length.contains(['[', ']']) {
        None
    } else {
        Some(length)
    }
}

/// Declared type usable for a local variable (drops `virtual`, `static`, ...).
pub(crate) fn local_type(arg: &Argument) -> String {
    arg.type_text()
        .split_whitespace()
        .filter(|word| !STORAGE_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(text: &str) -> Option<LuaType> {
        LuaType::of(&Argument::with_type("f", text))
    }

    #[test]
    fn test_classify_natives() {
        assert_eq!(ty("bool"), Some(LuaType::Boolean));
        assert_eq!(ty("int"), Some(LuaType::Integer("int".to_string())));
        assert_eq!(ty("const double"), Some(LuaType::Number("double".to_string())));
        assert_eq!(ty("unsigned int"), Some(LuaType::Integer("unsigned int".to_string())));
        assert_eq!(ty("int *"), None);
    }

    #[test]
    fn test_classify_strings() {
        assert_eq!(ty("const char *"), Some(LuaType::String));
        assert_eq!(ty("const std::string &"), Some(LuaType::StdString));
    }

    #[test]
    fn test_classify_classes() {
        assert_eq!(
            ty("Bar *"),
            Some(LuaType::Class {
                name: "Bar".to_string(),
                by_pointer: true
            })
        );
        assert_eq!(
            ty("const mylib::Bar &"),
            Some(LuaType::Class {
                name: "mylib::Bar".to_string(),
                by_pointer: false
            })
        );
        assert_eq!(ty("void *"), None);
        assert_eq!(ty("Bar **"), None);
    }

    #[test]
    fn test_check_and_pass() {
        let class = ty("const Bar &").unwrap();
        assert_eq!(
            class.check("other", 2, "mylib"),
            r#"Bar *other = *((Bar **)dubL_checkudata(L, 2, "mylib.Bar"));"#
        );
        assert_eq!(class.pass("other"), "*other");

        let number = ty("float").unwrap();
        assert_eq!(number.check("x", 1, "mylib"), "float x = (float)luaL_checknumber(L, 1);");
        assert_eq!(number.pass("x"), "x");
    }

    #[test]
    fn test_push() {
        assert_eq!(
            ty("Bar").unwrap().push("retval__", "mylib", false),
            r#"dub_pushudata(L, new Bar(retval__), "mylib.Bar", true);"#
        );
        assert_eq!(
            ty("Bar *").unwrap().push("retval__", "mylib", false),
            r#"dub_pushudata(L, retval__, "mylib.Bar", false);"#
        );
        assert_eq!(
            ty("Bar *").unwrap().push("retval__", "mylib", true),
            r#"dub_pushudata(L, retval__, "mylib.Bar", true);"#
        );
        assert_eq!(
            ty("std::string").unwrap().push("retval__", "", false),
            "lua_pushstring(L, retval__.c_str());"
        );
    }

    #[test]
    fn test_integer_and_number_tests_differ() {
        assert_eq!(ty("int").unwrap().test(2, ""), "dub_isinteger(L, 2)");
        assert_eq!(ty("double").unwrap().test(2, ""), "lua_type(L, 2) == LUA_TNUMBER");
    }

    #[test]
    fn test_array_length() {
        assert_eq!(array_length("[3]"), Some("3"));
        assert_eq!(array_length("[ SIZE ]"), Some("SIZE"));
        assert_eq!(array_length("[]"), None);
        assert_eq!(array_length("[3][4]"), None);
        assert_eq!(array_length("3"), None);
    }

    #[test]
    fn test_lib_name() {
        assert_eq!(lib_name("mylib", "ns::Bar"), "mylib.Bar");
        assert_eq!(lib_name("", "Bar"), "Bar");
    }

    #[test]
    fn test_local_type() {
        assert_eq!(local_type(&Argument::with_type("f", "virtual const Bar &")), "const Bar &");
    }
}
