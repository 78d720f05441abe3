//! Development tasks for the Mon workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{CheckContent, Simulate};
use tracing_subscriber::EnvFilter;

/// Development tasks for the Mon workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the Mon rules core", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Validate a content directory and dry-run every curse
    CheckContent(CheckContent),

    /// Run a headless world session and print its events
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for MON_DATA_DIR, MON_WORLD_SEED, ...)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::CheckContent(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
