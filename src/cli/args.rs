//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `clean`: Reconcile translation files in place (sort, move or drop unused keys)
//! - `check`: Report unused and missing keys without writing anything
//! - `init`: Initialize tclean configuration file

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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Clean(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory holding translation and UI-definition files (overrides config file)
    #[arg(long, env = "TCLEAN_RESOURCE_DIR")]
    pub resource_dir: Option<PathBuf>,

    /// Directory holding source files (overrides config file)
    #[arg(long, env = "TCLEAN_SOURCE_DIR")]
    pub source_dir: Option<PathBuf>,

    /// Namespace identifier that prefixes every key, e.g. a plugin id (overrides config file)
    #[arg(long = "namespace", env = "TCLEAN_NAMESPACE")]
    pub namespace_id: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Keep translation files in declaration order instead of sorting keys
    #[arg(long)]
    pub no_sort: bool,

    /// Delete unused keys instead of moving them to an "Unused keys" block
    #[arg(long)]
    pub remove_unused: bool,

    /// Report which files would change without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sort translation files and move or remove unused keys
    Clean(CleanCommand),
    /// Report unused and missing translation keys without modifying files
    Check(CheckCommand),
    /// Initialize a new .tcleanrc.json configuration file
    Init,
}
