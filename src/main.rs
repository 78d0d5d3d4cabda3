//! tictactoe_arcade - terminal tic-tac-toe.

#![warn(missing_docs)]

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tictactoe_arcade::{Cli, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    initialize_tracing(config.log_file())?;
    info!(?config, "Starting tictactoe_arcade");

    run_tui(config).await
}

/// Logs to a file so output does not interfere with the terminal UI.
fn initialize_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictactoe_arcade=debug")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
