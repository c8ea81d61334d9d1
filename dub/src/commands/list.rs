use clap::Args;
use eyre::Result;

use super::SourceArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::list(&self.source.settings())?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
