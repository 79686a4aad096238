//! Marquee CLI - Command-line interface
//!
//! Provides command-line access to movie discovery: catalog search with
//! auto-paging, trending titles, detail views, and bookmark management.

mod commands;

use clap::Parser;
use marquee_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "A movie discovery toolkit")]
struct Cli {
    /// Console log level
    #[arg(long, default_value = "warn")]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), None)?;
    commands::handle_command(cli.command).await?;

    Ok(())
}
