use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    DeclNode, Error, Function, FunctionGenerator, Generator, MemberNode, Namespace, Parent, Result,
    function::build_overloads,
};

/// Raw input for one class: its compound node and its function declarations.
#[derive(Debug, Clone, Default)]
pub struct KlassDecl {
    pub name: String,
    pub node: DeclNode,
    pub members: Vec<DeclNode>,
    pub alias_names: Vec<String>,
    /// Public enum values declared inside the class.
    pub constants: Vec<String>,
}

impl KlassDecl {
    pub fn new(name: impl Into<String>, node: DeclNode) -> Self {
        Self {
            name: name.into(),
            node,
            ..Default::default()
        }
    }

    pub fn member(mut self, member: DeclNode) -> Self {
        self.members.push(member);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias_names.push(alias.into());
        self
    }

    pub fn constant(mut self, name: impl Into<String>) -> Self {
        self.constants.push(name.into());
        self
    }
}

/// A named declaration container with grouped member functions.
pub struct Klass {
    name: String,
    namespace_name: Option<String>,
    namespace: Weak<Namespace>,
    node: DeclNode,
    alias_names: Vec<String>,
    constants: Vec<String>,
    members: Vec<MemberNode<Function>>,
    constructors: Vec<Function>,
    generator: RefCell<Option<Rc<dyn Generator>>>,
}

impl Klass {
    /// Build a class that does not belong to any namespace.
    pub fn new(decl: KlassDecl) -> Rc<Self> {
        Self::build(decl, None, Weak::new())
    }

    pub(crate) fn build(
        decl: KlassDecl,
        namespace_name: Option<String>,
        namespace: Weak<Namespace>,
    ) -> Rc<Self> {
        let KlassDecl {
            name,
            node,
            members,
            alias_names,
            constants,
        } = decl;

        Rc::new_cyclic(|me| {
            let parent = Parent::Klass {
                name: name.clone(),
                klass: me.clone(),
            };

            let mut constructors = Vec::new();
            let mut grouped = Vec::new();
            for (member_name, mut functions) in build_overloads(&parent, &name, members) {
                if member_name == name {
                    constructors = functions;
                } else if functions.len() == 1 {
                    grouped.extend(functions.pop().map(MemberNode::Leaf));
                } else {
                    grouped.push(MemberNode::Group(
                        functions.into_iter().map(MemberNode::Leaf).collect(),
                    ));
                }
            }

            Klass {
                name,
                namespace_name,
                namespace,
                node,
                alias_names,
                constants,
                members: grouped,
                constructors,
                generator: RefCell::new(None),
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias_names(&self) -> &[String] {
        &self.alias_names
    }

    /// Enum values exposed as numbers on the class metatable.
    pub fn constants(&self) -> &[String] {
        &self.constants
    }

    pub fn namespace_name(&self) -> Option<&str> {
        self.namespace_name.as_deref()
    }

    pub fn namespace(&self) -> Option<Rc<Namespace>> {
        self.namespace.upgrade()
    }

    pub fn node(&self) -> &DeclNode {
        &self.node
    }

    /// Member functions in declaration order; overloads share a group.
    ///
    /// Constructors are not part of this list, see [`Klass::constructor`].
    pub fn members(&self) -> &[MemberNode<Function>] {
        &self.members
    }

    /// The designated constructor (the first one declared).
    pub fn constructor(&self) -> Option<&Function> {
        self.constructors.first()
    }

    pub fn constructors(&self) -> &[Function] {
        &self.constructors
    }

    /// Every function of the class, constructors first.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.constructors
            .iter()
            .chain(self.members.iter().flat_map(MemberNode::leaves))
    }

    /// Member slot by name.
    pub fn member(&self, name: &str) -> Option<&MemberNode<Function>> {
        self.members
            .iter()
            .find(|node| node.first().is_some_and(|f| f.name() == name))
    }

    /// Identifier of the synthesized string-conversion hook.
    pub fn tostring_name(&self) -> String {
        format!("{}__tostring", self.name)
    }

    /// Identifier of the synthesized destructor hook.
    pub fn destructor_name(&self) -> String {
        format!("{}_destructor", self.name)
    }

    /// Registry name of the class (e.g. "mylib.Foo").
    pub fn lib_name(&self) -> String {
        match &self.namespace_name {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Header declaring the class, from the compound location.
    pub fn header(&self) -> Option<&str> {
        self.node.child("location")?.attr("file")
    }

    /// Bind a generator to the class and every one of its functions.
    pub fn bind(&self, generator: Rc<dyn Generator>) {
        let function_generator = generator.function_generator();
        for function in self.functions() {
            function.bind(Rc::clone(&function_generator));
        }
        *self.generator.borrow_mut() = Some(generator);
    }

    /// Bound generator, or the namespace's one.
    pub fn generator(&self) -> Option<Rc<dyn Generator>> {
        if let Some(generator) = self.generator.borrow().as_ref() {
            return Some(Rc::clone(generator));
        }
        self.namespace.upgrade()?.generator()
    }

    /// Default generator for member functions that were not bound directly.
    pub fn function_generator(&self) -> Option<Rc<dyn FunctionGenerator>> {
        self.generator().map(|g| g.function_generator())
    }

    /// Render the binding source of this class.
    pub fn render(&self) -> Result<String> {
        let generator = self.generator().ok_or_else(|| Error::UnboundGenerator {
            name: self.name.clone(),
        })?;
        generator.klass(self)
    }
}

impl fmt::Debug for Klass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Klass")
            .field("name", &self.name)
            .field("alias_names", &self.alias_names)
            .field("constructors", &self.constructors)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}
