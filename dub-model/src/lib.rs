//! Declaration entity model for the dub binding generator.
//!
//! Parsed API declarations are turned into an immutable graph of
//! [`Namespace`] → [`Klass`] → [`Function`] → [`Argument`], built once at
//! load time. A target generator is then bound to the graph and renders
//! it by calling back into the entity accessors.
//!
//! # Architecture
//!
//! ```text
//! doxygen xml → DeclNode trees → entity model → Generator → binding sources
//! ```
//!
//! Children point back at their owner through [`Parent`], a non-owning
//! handle, so the graph holds no reference cycles.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod argument;
mod decl;
mod error;
mod function;
mod generator;
mod klass;
mod member;
mod namespace;

pub use argument::Argument;
pub use decl::{DeclContent, DeclNode};
pub use error::{Error, Result};
pub use function::{Function, Parent};
pub use generator::{FunctionGenerator, Generator};
pub use klass::{Klass, KlassDecl};
pub use member::MemberNode;
pub use namespace::Namespace;
