//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Detect key usages across the project and flag missing keys
//! - `keys`: List resolved key usages of a single file
//! - `init`: Initialize a keylens configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Locale files root directory (overrides config file)
    #[arg(long)]
    pub locales_root: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan source files for key usages and report missing keys
    Scan(ScanCommand),
    /// List the resolved key usages of a single file
    Keys(KeysCommand),
    /// Create a default configuration file
    Init,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    /// Source file to analyze
    pub file: PathBuf,

    /// Emit machine-readable JSON instead of the text listing
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}
