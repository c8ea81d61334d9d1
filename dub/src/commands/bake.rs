use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::SourceArgs;
use crate::{
    ops::{self, BakeOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory (overrides dub.toml setting)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl BakeCommand {
    pub fn run(&self) -> Result<()> {
        let mut settings = self.source.settings();
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }

        let report = ops::bake(
            &settings,
            BakeOptions {
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
