//! Lua target for the dub binding generator.
//!
//! Renders C++ source files exposing classes and free functions to Lua
//! through the C API: one file per class, one for the free functions of
//! the namespace, and a shared `dub/dub.h` helper header.

mod class_gen;
mod function_gen;
mod generator;
mod type_mapper;

pub mod files;

pub use class_gen::{ClassGen, IgnoreReason};
pub use dub_codegen::{GenerateResult, LanguageCodegen, PreviewFile};
pub use function_gen::FunctionGen;
pub use generator::Generator;
