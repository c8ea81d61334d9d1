//! Report data structures for commands.
//!
//! Operations build reports, then commands render them to an Output target.

mod bake;
mod list;
mod output;

pub use bake::{BakeReport, GenerationResult, PreviewResult, WrittenResult};
pub use list::{ClassInfo, ListReport};
pub use output::{Report, TerminalOutput};
