//! Doxygen XML loader for the dub binding generator.
//!
//! Reads the XML output of doxygen (`index.xml` plus one file per compound)
//! and builds the [`dub_model`] entity graph for one namespace.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod loader;
mod xml;

pub use error::{Error, Result};
pub use loader::{CompoundRef, DoxygenDir};
pub use xml::{parse_xml, read_xml};
