//! Game configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::controller::Timings;

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArcadeConfig {
    /// How long the "Get Ready!" screen stays up, in milliseconds.
    #[serde(default = "default_transition_ms")]
    transition_ms: u64,

    /// How long the computer waits before moving, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Seed for the computer opponent. Random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Where tracing output goes while the terminal UI is up.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_transition_ms() -> u64 {
    Timings::DEFAULT_TRANSITION_MS
}

fn default_opponent_delay_ms() -> u64 {
    Timings::DEFAULT_OPPONENT_DELAY_MS
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe_arcade.log")
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            opponent_delay_ms: default_opponent_delay_ms(),
            seed: None,
            log_file: default_log_file(),
        }
    }
}

impl ArcadeConfig {
    /// File looked up in the working directory when no path is given.
    pub const DEFAULT_PATH: &'static str = "tictactoe_arcade.toml";

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            transition_ms = config.transition_ms,
            opponent_delay_ms = config.opponent_delay_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, else [`Self::DEFAULT_PATH`] if it exists, else
    /// defaults. An explicit path that cannot be read is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(Self::DEFAULT_PATH).exists() => Self::from_file(Self::DEFAULT_PATH),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides the transition delay.
    pub fn with_transition_ms(mut self, ms: u64) -> Self {
        self.transition_ms = ms;
        self
    }

    /// Overrides the opponent delay.
    pub fn with_opponent_delay_ms(mut self, ms: u64) -> Self {
        self.opponent_delay_ms = ms;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the log file.
    pub fn with_log_file(mut self, log_file: PathBuf) -> Self {
        self.log_file = log_file;
        self
    }

    /// Delays for the controller.
    pub fn timings(&self) -> Timings {
        Timings::new(
            Duration::from_millis(self.transition_ms),
            Duration::from_millis(self.opponent_delay_ms),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
