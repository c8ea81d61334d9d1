use std::{
    cell::{OnceCell, RefCell},
    cmp::Ordering,
    fmt,
    rc::{Rc, Weak},
};

use dub_core::{last_path_segments, unescape_entities};
use indexmap::IndexMap;

use crate::{Argument, DeclNode, Error, FunctionGenerator, Klass, Namespace, Result};

/// Path segments kept by [`Function::source`].
const SOURCE_SEGMENTS: usize = 3;

/// Non-owning handle from a function to the container that owns it.
#[derive(Debug, Clone)]
pub enum Parent {
    Klass { name: String, klass: Weak<Klass> },
    Namespace { name: String, namespace: Weak<Namespace> },
}

impl Parent {
    pub fn name(&self) -> &str {
        match self {
            Parent::Klass { name, .. } | Parent::Namespace { name, .. } => name,
        }
    }

    pub fn is_klass(&self) -> bool {
        matches!(self, Parent::Klass { .. })
    }

    /// Default function generator of the owner, if it has one.
    pub fn function_generator(&self) -> Option<Rc<dyn FunctionGenerator>> {
        match self {
            Parent::Klass { klass, .. } => klass.upgrade()?.function_generator(),
            Parent::Namespace { namespace, .. } => namespace.upgrade()?.function_generator(),
        }
    }
}

/// One function declaration: a class member, a constructor or a free function.
pub struct Function {
    name: String,
    prefix: String,
    overloaded_index: Option<usize>,
    parent: Option<Parent>,
    arguments: Vec<Argument>,
    return_value: Option<Argument>,
    node: DeclNode,
    generator: RefCell<Option<Rc<dyn FunctionGenerator>>>,
    has_default_arguments: OnceCell<bool>,
    has_array_arguments: OnceCell<bool>,
    vararg: OnceCell<bool>,
}

impl Function {
    /// Build a function from its declaration node.
    ///
    /// Parameters become arguments numbered from 1 in document order. The
    /// return value is taken from the direct `type` child unless it is empty
    /// or `void`; constructors return a pointer to their class instead.
    pub fn new(
        parent: Option<Parent>,
        name: impl Into<String>,
        node: DeclNode,
        prefix: impl Into<String>,
        overloaded_index: Option<usize>,
    ) -> Self {
        let name = name.into();

        let arguments = node
            .children("param")
            .enumerate()
            .map(|(i, param)| Argument::from_param(&name, param, i + 1))
            .collect();

        let mut return_value = node
            .child("type")
            .filter(|ty| !ty.text().trim().is_empty())
            .map(|ty| Argument::return_value(&name, ty))
            .filter(|arg| !arg.is_void());

        let is_constructor = parent
            .as_ref()
            .is_some_and(|p| p.is_klass() && p.name() == name);
        if is_constructor {
            return_value = Some(Argument::with_type(&name, format!("{} *", name)));
        }

        Self {
            name,
            prefix: prefix.into(),
            overloaded_index,
            parent,
            arguments,
            return_value,
            node,
            generator: RefCell::new(None),
            has_default_arguments: OnceCell::new(),
            has_array_arguments: OnceCell::new(),
            vararg: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Disambiguation prefix (the class name for members, the namespace for free functions).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn overloaded_index(&self) -> Option<usize> {
        self.overloaded_index
    }

    pub fn parent(&self) -> Option<&Parent> {
        self.parent.as_ref()
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn return_value(&self) -> Option<&Argument> {
        self.return_value.as_ref()
    }

    /// Declaration tree this function was built from.
    pub fn node(&self) -> &DeclNode {
        &self.node
    }

    /// `Class::name` for members, plain name otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.parent {
            Some(Parent::Klass { name, .. }) => format!("{}::{}", name, self.name),
            _ => self.name.clone(),
        }
    }

    /// Record the generator used for rendering and name resolution.
    ///
    /// Rebinding overwrites the previous generator.
    pub fn bind(&self, generator: Rc<dyn FunctionGenerator>) {
        *self.generator.borrow_mut() = Some(generator);
    }

    /// Bound generator, or the parent's default one.
    pub fn generator(&self) -> Option<Rc<dyn FunctionGenerator>> {
        if let Some(generator) = self.generator.borrow().as_ref() {
            return Some(Rc::clone(generator));
        }
        self.parent.as_ref()?.function_generator()
    }

    fn require_generator(&self) -> Result<Rc<dyn FunctionGenerator>> {
        self.generator().ok_or_else(|| Error::UnboundGenerator {
            name: self.qualified_name(),
        })
    }

    /// Render this function through its generator.
    pub fn render(&self) -> Result<String> {
        self.require_generator()?.function(self)
    }

    /// Unique callable identifier, optionally for an explicit overload index.
    pub fn method_name(&self, overloaded_index: Option<usize>) -> Result<String> {
        Ok(self
            .require_generator()?
            .method_name(self, overloaded_index))
    }

    /// Owning class, if any.
    pub fn klass(&self) -> Option<Rc<Klass>> {
        match &self.parent {
            Some(Parent::Klass { klass, .. }) => klass.upgrade(),
            _ => None,
        }
    }

    pub fn member_method(&self) -> bool {
        self.parent.as_ref().is_some_and(Parent::is_klass)
    }

    pub fn constructor(&self) -> bool {
        self.parent
            .as_ref()
            .is_some_and(|p| p.is_klass() && p.name() == self.name)
    }

    pub fn is_static(&self) -> bool {
        self.node.attr("static") == Some("yes")
    }

    pub fn has_default_arguments(&self) -> bool {
        *self
            .has_default_arguments
            .get_or_init(|| self.arguments.iter().any(Argument::has_default))
    }

    pub fn has_array_arguments(&self) -> bool {
        *self
            .has_array_arguments
            .get_or_init(|| self.arguments.iter().any(|a| a.array_suffix().is_some()))
    }

    /// Only the last argument can make a function variadic.
    pub fn vararg(&self) -> bool {
        *self
            .vararg
            .get_or_init(|| self.arguments.last().is_some_and(Argument::is_vararg))
    }

    /// Number of arguments a caller must provide.
    pub fn required_arguments(&self) -> usize {
        self.arguments
            .iter()
            .take_while(|a| !a.has_default() && !a.is_vararg())
            .count()
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_value.as_ref().map(Argument::type_text)
    }

    pub fn return_type_is_native_pointer(&self) -> bool {
        self.return_value
            .as_ref()
            .is_some_and(Argument::is_native_pointer)
    }

    /// `path:line` of the declaration, keeping only the last three path segments.
    pub fn source(&self) -> Result<String> {
        let missing = || Error::MissingLocation {
            name: self.qualified_name(),
        };
        let location = self.node.child("location").ok_or_else(missing)?;
        let file = location.attr("file").ok_or_else(missing)?;
        let line = location.attr("line").ok_or_else(missing)?;

        Ok(format!(
            "{}:{}",
            last_path_segments(file, SOURCE_SEGMENTS),
            line
        ))
    }

    /// Source-level signature, e.g. `int Foo::bar(int x) const`.
    pub fn original_signature(&self) -> String {
        unescape_entities(&format!(
            "{}{}",
            self.node.child_text("definition"),
            self.node.child_text("argsstring")
        ))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<&str> = self.arguments.iter().map(Argument::type_text).collect();
        write!(f, "Function {}_{}({})", self.prefix, self.name, args.join(", "))
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Function {}

impl PartialOrd for Function {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Functions order by name only.
impl Ord for Function {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Build functions from `memberdef` nodes, grouped by name in first-seen order.
///
/// Names declared more than once get overload indices starting at 1.
pub(crate) fn build_overloads(
    parent: &Parent,
    prefix: &str,
    nodes: impl IntoIterator<Item = DeclNode>,
) -> IndexMap<String, Vec<Function>> {
    let mut by_name: IndexMap<String, Vec<DeclNode>> = IndexMap::new();
    for node in nodes {
        let name = node.child_text("name").trim().to_string();
        by_name.entry(name).or_default().push(node);
    }

    by_name
        .into_iter()
        .map(|(name, nodes)| {
            let overloaded = nodes.len() > 1;
            let functions = nodes
                .into_iter()
                .enumerate()
                .map(|(i, node)| {
                    let index = overloaded.then_some(i + 1);
                    Function::new(Some(parent.clone()), name.clone(), node, prefix, index)
                })
                .collect();
            (name, functions)
        })
        .collect()
}
