//! Command-line interface for tictactoe_arcade.

use std::path::PathBuf;

use clap::Parser;
use tracing::instrument;

use crate::config::{ArcadeConfig, ConfigError};

/// Tic-tac-toe in the terminal, against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe_arcade")]
#[command(about = "Terminal tic-tac-toe with a friend or a random computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tictactoe_arcade.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Duration of the "Get Ready!" screen in milliseconds
    #[arg(long)]
    pub transition_ms: Option<u64>,

    /// Delay before the computer moves in milliseconds
    #[arg(long)]
    pub opponent_delay_ms: Option<u64>,

    /// Seed for the computer opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// File receiving log output
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file and applies flag overrides on top.
    #[instrument(skip(self))]
    pub fn resolve_config(&self) -> Result<ArcadeConfig, ConfigError> {
        let mut config = ArcadeConfig::load(self.config.as_deref())?;
        if let Some(ms) = self.transition_ms {
            config = config.with_transition_ms(ms);
        }
        if let Some(ms) = self.opponent_delay_ms {
            config = config.with_opponent_delay_ms(ms);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(path) = &self.log_file {
            config = config.with_log_file(path.clone());
        }
        Ok(config)
    }
}
