//! Generator protocol implemented by every binding target.

use std::rc::Rc;

use crate::{Function, Klass, Namespace, Result};

/// Renders single functions and resolves their callable identifiers.
pub trait FunctionGenerator {
    /// Render the target-code fragment for one function.
    fn function(&self, function: &Function) -> Result<String>;

    /// Unique identifier of the function in generated code.
    ///
    /// `overloaded_index` overrides the function's own index for this call only.
    fn method_name(&self, function: &Function, overloaded_index: Option<usize>) -> String;
}

/// A binding target: renders whole classes and namespaces.
///
/// Entities bind a generator once, then resolve it at call time through
/// the fixed chain function → class → namespace.
pub trait Generator {
    /// Render the binding source for one class.
    fn klass(&self, klass: &Klass) -> Result<String>;

    /// Render the binding source for the free functions of a namespace.
    fn namespace(&self, namespace: &Namespace) -> Result<String>;

    /// Generator used by functions that have no directly bound one.
    fn function_generator(&self) -> Rc<dyn FunctionGenerator>;
}
