//! schemabump CLI - bump the database schema version of an Operaton source tree

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{bump, show};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Bump(args) => bump::execute(args, &cli.global).await,
        cli::Commands::Show(args) => show::execute(args, &cli.global).await,
    }
}

/// `RUST_LOG` wins over the level picked by `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
