use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    DeclNode, Error, Function, FunctionGenerator, Generator, Klass, KlassDecl, MemberNode, Parent,
    Result, function::build_overloads,
};

/// Top-level container: owns classes and free functions, and provides the
/// default generator for both.
pub struct Namespace {
    name: String,
    classes: Vec<Rc<Klass>>,
    functions: Vec<MemberNode<Function>>,
    generator: RefCell<Option<Rc<dyn Generator>>>,
}

impl Namespace {
    pub fn new(
        name: impl Into<String>,
        classes: Vec<KlassDecl>,
        functions: Vec<DeclNode>,
    ) -> Rc<Self> {
        let name = name.into();

        Rc::new_cyclic(|me| {
            let parent = Parent::Namespace {
                name: name.clone(),
                namespace: me.clone(),
            };

            let classes = classes
                .into_iter()
                .map(|decl| Klass::build(decl, Some(name.clone()), me.clone()))
                .collect();

            let functions = build_overloads(&parent, &name, functions)
                .into_values()
                .map(|mut group| {
                    if group.len() == 1 {
                        MemberNode::Leaf(group.remove(0))
                    } else {
                        MemberNode::Group(group.into_iter().map(MemberNode::Leaf).collect())
                    }
                })
                .collect();

            Namespace {
                name,
                classes,
                functions,
                generator: RefCell::new(None),
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &[Rc<Klass>] {
        &self.classes
    }

    pub fn klass(&self, name: &str) -> Option<&Rc<Klass>> {
        self.classes.iter().find(|k| k.name() == name)
    }

    /// Free functions; overloads share a group.
    pub fn functions(&self) -> &[MemberNode<Function>] {
        &self.functions
    }

    /// Set the default generator for every class and free function.
    pub fn bind(&self, generator: Rc<dyn Generator>) {
        *self.generator.borrow_mut() = Some(generator);
    }

    pub fn generator(&self) -> Option<Rc<dyn Generator>> {
        self.generator.borrow().as_ref().map(Rc::clone)
    }

    pub fn function_generator(&self) -> Option<Rc<dyn FunctionGenerator>> {
        self.generator().map(|g| g.function_generator())
    }

    /// Render the binding source for the free functions.
    pub fn render(&self) -> Result<String> {
        let generator = self.generator().ok_or_else(|| Error::UnboundGenerator {
            name: self.name.clone(),
        })?;
        generator.namespace(self)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("classes", &self.classes)
            .field("functions", &self.functions)
            .finish_non_exhaustive()
    }
}
