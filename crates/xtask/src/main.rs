//! Development tasks for item tooling
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{InspectItem, MigrateItem};

/// Development tasks for item tooling
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for item payloads", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Decode and inspect a serialized item blob
    InspectItem(InspectItem),

    /// Rewrite a serialized item blob in another serialized version
    MigrateItem(MigrateItem),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::InspectItem(cmd) => cmd.execute(),
        Command::MigrateItem(cmd) => cmd.execute(),
    }
}
