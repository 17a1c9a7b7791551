//! Placard CLI - render preset placards to PNG

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Presets(args) => args.verbose,
        Commands::Render(args) => args.verbose,
    };
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Presets(args) => commands::presets::run(&args),
        Commands::Render(args) => commands::render::run(&args),
    }
}
