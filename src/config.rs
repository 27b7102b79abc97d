//! Party configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_range::{MAX_PLAYERS, MIN_PLAYERS};
use tracing::{debug, info, instrument};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "STRICTLY_RANGE_CONFIG";

/// Settings for a game night.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PartyConfig {
    /// Seats at the table (2 to 10).
    #[serde(default = "default_num_players")]
    num_players: usize,

    /// JSON-lines file receiving one object per guess and round end.
    #[serde(default)]
    telemetry_path: Option<PathBuf>,

    /// Show the advisor's recommendation on every turn.
    #[serde(default = "default_show_advice")]
    show_advice: bool,
}

#[instrument]
fn default_num_players() -> usize {
    MIN_PLAYERS
}

#[instrument]
fn default_show_advice() -> bool {
    true
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            num_players: default_num_players(),
            telemetry_path: None,
            show_advice: default_show_advice(),
        }
    }
}

impl PartyConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(num_players = config.num_players, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the config source: an explicit path, then the environment
    /// variable, then built-in defaults.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(CONFIG_ENV_VAR).ok();
        match resolve_path(explicit, from_env.as_deref()) {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides and validates the result.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        num_players: Option<usize>,
        telemetry_path: Option<PathBuf>,
        hide_advice: bool,
    ) -> Result<Self, ConfigError> {
        if let Some(n) = num_players {
            self.num_players = n;
        }
        if telemetry_path.is_some() {
            self.telemetry_path = telemetry_path;
        }
        if hide_advice {
            self.show_advice = false;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks the player count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(ConfigError::new(format!(
                "num_players must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.num_players
            )));
        }
        Ok(())
    }
}

/// Picks the config file: `--config` wins over the environment.
pub fn resolve_path(explicit: Option<&Path>, from_env: Option<&str>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| from_env.filter(|s| !s.is_empty()).map(PathBuf::from))
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
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
