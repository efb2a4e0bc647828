// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Layered configuration for the leaderboard tools.
//!
//! Values are resolved in this order, later layers winning:
//!
//! 1. Built-in defaults ([`ConfigKey::default_value`])
//! 2. An optional TOML file
//! 3. `LEADERBOARD_*` environment variables
//!
//! # Example
//!
//! ```no_run
//! use llm_leaderboard_adapters::settings::LeaderboardConfig;
//!
//! let config = LeaderboardConfig::load(Some("leaderboard.toml".as_ref()))?;
//! println!("writing to {}", config.output_dir.display());
//! # Ok::<(), llm_leaderboard_adapters::settings::ConfigError>(())
//! ```

use config::{Config, Environment, File, FileFormat};
use llm_leaderboard_core::RankingSort;
use llm_leaderboard_report::ScoreScale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "LEADERBOARD";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Loading or deserializing the layered configuration failed
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Known configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Directory scanned for result files
    ResultsDir,
    /// Directory report outputs are written to
    OutputDir,
    /// Score rendering: `percent` or `fraction`
    ScoreScale,
    /// Row order: `average` or `name`
    Sort,
    /// Default log filter
    LogLevel,
}

impl ConfigKey {
    /// Every key.
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::ResultsDir,
        ConfigKey::OutputDir,
        ConfigKey::ScoreScale,
        ConfigKey::Sort,
        ConfigKey::LogLevel,
    ];

    /// Get the configuration key name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ResultsDir => "results_dir",
            Self::OutputDir => "output_dir",
            Self::ScoreScale => "score_scale",
            Self::Sort => "sort",
            Self::LogLevel => "log_level",
        }
    }

    /// Environment variable overriding this key.
    pub fn env_var(&self) -> String {
        format!("{}_{}", ENV_PREFIX, self.key().to_uppercase())
    }

    /// Get the default value for this key, if it has one.
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            Self::ResultsDir => None,
            Self::OutputDir => Some("leaderboard/output"),
            Self::ScoreScale => Some("percent"),
            Self::Sort => Some("average"),
            Self::LogLevel => Some("info"),
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Directory scanned for result files
    #[serde(default)]
    pub results_dir: Option<PathBuf>,
    /// Directory report outputs are written to
    pub output_dir: PathBuf,
    /// Score rendering
    pub score_scale: ScoreScale,
    /// Row order
    pub sort: RankingSort,
    /// Default log filter
    pub log_level: String,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            results_dir: None,
            output_dir: PathBuf::from("leaderboard/output"),
            score_scale: ScoreScale::Percent,
            sort: RankingSort::Average,
            log_level: "info".to_string(),
        }
    }
}

impl LeaderboardConfig {
    /// Load defaults, the optional file, then `LEADERBOARD_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load with an explicit environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        for key in ConfigKey::ALL {
            if let Some(value) = key.default_value() {
                builder = builder.set_default(key.key(), value)?;
            }
        }

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }
}
