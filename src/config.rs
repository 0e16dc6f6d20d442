//! Configuration module for boardtree.

use serde::Deserialize;
use std::path::Path;

use crate::{BoardTreeError, Result};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/boardtree.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Board hierarchy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardsConfig {
    /// Gap between consecutive display orders of new boards.
    #[serde(default = "default_order_step")]
    pub order_step: i32,
    /// Maximum nesting depth (0 = root). Unset means unbounded.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Path to the JSON board snapshot read by the binary.
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
}

fn default_order_step() -> i32 {
    crate::hierarchy::ORDER_STEP
}

fn default_snapshot() -> String {
    "data/boards.json".to_string()
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self {
            order_step: default_order_step(),
            max_depth: None,
            snapshot: default_snapshot(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Board hierarchy configuration.
    #[serde(default)]
    pub boards: BoardsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardTreeError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardTreeError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BOARDTREE_LOG_LEVEL`: Override the log level
    /// - `BOARDTREE_SNAPSHOT`: Override the snapshot path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("BOARDTREE_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
        if let Ok(snapshot) = std::env::var("BOARDTREE_SNAPSHOT") {
            if !snapshot.is_empty() {
                self.boards.snapshot = snapshot;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - `order_step` is zero or negative
    pub fn validate(&self) -> Result<()> {
        if self.boards.order_step <= 0 {
            return Err(BoardTreeError::Config(format!(
                "boards.order_step must be positive, got {}",
                self.boards.order_step
            )));
        }
        Ok(())
    }
}
