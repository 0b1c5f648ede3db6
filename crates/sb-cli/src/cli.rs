//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use sb_core::Version;
use std::path::PathBuf;

/// schemabump - bump the database schema version of an Operaton source tree
#[derive(Parser, Debug)]
#[command(name = "sb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the source tree root
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path (default: schemabump.yml in the project dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bump the schema version and generate the per-dialect artifacts
    Bump(BumpArgs),

    /// Show the recorded schema versions and per-dialect state
    Show(ShowArgs),
}

/// Arguments for the bump command
#[derive(Args, Debug)]
pub struct BumpArgs {
    /// Target version (X.Y.Z, default: next minor version)
    #[arg(short, long)]
    pub new_version: Option<Version>,

    /// Dialects to update (comma-separated, default: all)
    #[arg(short, long)]
    pub dialects: Option<String>,

    /// Take defaults for anything not given and skip the confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Print the plan without changing any file
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: ShowOutput,
}

/// Show output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
