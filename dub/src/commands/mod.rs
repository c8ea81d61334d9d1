mod bake;
mod completions;
mod list;

use std::path::PathBuf;

use bake::BakeCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use dub_manifest::{DubToml, MANIFEST_FILE};
use eyre::Result;
use list::ListCommand;

use crate::ops::Settings;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for dub_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "dub")]
#[command(version)]
#[command(about = "Generate Lua bindings for C++ libraries from doxygen XML")]
pub(crate) struct Cli {
    /// Show debug logs (skipped members, loaded classes)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Bake(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate binding sources from doxygen XML
    Bake(BakeCommand),

    /// List classes, their bound members and the ignored ones
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Where declarations come from. Flags override dub.toml.
#[derive(Args)]
pub struct SourceArgs {
    /// Path to dub.toml (defaults to ./dub.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Doxygen XML directory
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Namespace to bind
    #[arg(long)]
    pub name: Option<String>,
}

impl SourceArgs {
    /// Merge the manifest, if any, with the command-line overrides.
    pub fn settings(&self) -> Settings {
        let manifest = match &self.config {
            Some(path) => Some(DubToml::open(path).unwrap_or_exit()),
            None if PathBuf::from(MANIFEST_FILE).exists() => {
                Some(DubToml::open(MANIFEST_FILE).unwrap_or_exit())
            }
            None => None,
        };

        let mut settings = manifest
            .as_ref()
            .map(Settings::from_manifest)
            .unwrap_or_default();
        if let Some(input) = &self.input {
            settings.input = input.clone();
        }
        if let Some(name) = &self.name {
            settings.name = Some(name.clone());
        }
        settings
    }
}
