//! Core operations.
//!
//! This module contains the business logic for dub commands,
//! separated from CLI argument parsing and output rendering.

pub mod bake;
pub mod list;
mod settings;

#[cfg(test)]
pub(crate) mod fixtures;

pub use bake::{BakeOptions, bake};
pub use list::list;
pub use settings::Settings;
