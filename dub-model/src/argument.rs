//! One declaration parameter or return value.

use crate::DeclNode;

/// C scalar types the target bridge converts by value.
const NATIVE_TYPES: &[&str] = &[
    "bool",
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
    "float",
    "double",
    "long double",
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

/// Qualifiers that do not change the base type.
const QUALIFIERS: &[&str] = &["const", "virtual", "static", "inline", "explicit", "volatile"];

const VARARG: &str = "...";

/// A parameter (position `Some(n)`, 1-based) or a return value (position `None`).
///
/// Immutable once built. The owning function is referenced by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    function: String,
    position: Option<usize>,
    name: Option<String>,
    type_text: String,
    default_value: Option<String>,
    array_suffix: Option<String>,
    vararg: bool,
}

impl Argument {
    /// Build a parameter from a `param` declaration node.
    pub fn from_param(function: &str, node: &DeclNode, position: usize) -> Self {
        let type_text = normalize_type(&node.child_text("type"));
        let name = non_empty(node.child_text("declname"));
        let default_value = non_empty(node.child_text("defval"));
        let array_suffix = non_empty(node.child_text("array"));
        let vararg = type_text == VARARG;

        Self {
            function: function.to_string(),
            position: Some(position),
            name,
            type_text,
            default_value,
            array_suffix,
            vararg,
        }
    }

    /// Build a return value from the declaration's `type` node.
    pub fn return_value(function: &str, type_node: &DeclNode) -> Self {
        Self::with_type(function, type_node.text())
    }

    /// Build a return value from raw type text.
    pub fn with_type(function: &str, type_text: impl AsRef<str>) -> Self {
        Self {
            function: function.to_string(),
            position: None,
            name: None,
            type_text: normalize_type(type_text.as_ref()),
            default_value: None,
            array_suffix: None,
            vararg: false,
        }
    }

    /// Name of the owning function.
    pub fn function_name(&self) -> &str {
        &self.function
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Declared parameter name, falling back to `argN`.
    pub fn name(&self) -> String {
        match (&self.name, self.position) {
            (Some(name), _) => name.clone(),
            (None, Some(position)) => format!("arg{}", position),
            (None, None) => "retval__".to_string(),
        }
    }

    /// Type text with whitespace collapsed (e.g. "const Foo &").
    pub fn type_text(&self) -> &str {
        &self.type_text
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Array suffix such as `[3]`.
    pub fn array_suffix(&self) -> Option<&str> {
        self.array_suffix.as_deref()
    }

    pub fn is_vararg(&self) -> bool {
        self.vararg
    }

    pub fn is_return_value(&self) -> bool {
        self.position.is_none()
    }

    /// True when the type ends with the `void` sentinel (`void`, `virtual void`).
    pub fn is_void(&self) -> bool {
        self.type_text.split_whitespace().last() == Some("void")
    }

    pub fn is_pointer(&self) -> bool {
        self.type_text.ends_with('*')
    }

    pub fn is_reference(&self) -> bool {
        self.type_text.ends_with('&')
    }

    pub fn is_const(&self) -> bool {
        self.type_text.split_whitespace().any(|word| word == "const")
    }

    /// Type without qualifiers, pointers or references (e.g. "const Foo *" -> "Foo").
    pub fn base_type(&self) -> String {
        self.type_text
            .replace(['*', '&'], " ")
            .split_whitespace()
            .filter(|word| !QUALIFIERS.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_native(&self) -> bool {
        NATIVE_TYPES.contains(&self.base_type().as_str())
    }

    /// `char *` and `const char *` are passed as strings.
    pub fn is_string(&self) -> bool {
        self.base_type() == "char" && self.type_text.matches('*').count() == 1
    }

    /// Pointer to a native scalar, which the bridge cannot own or convert.
    pub fn is_native_pointer(&self) -> bool {
        self.is_pointer() && self.is_native() && !self.is_string()
    }
}

fn normalize_type(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
