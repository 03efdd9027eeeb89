//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::contest::{Roster, RosterError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub contest: ContestConfig,

    #[serde(default)]
    pub board: BoardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub roster: Roster,
}

/// Contest presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct ContestConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_duration_label")]
    pub duration_label: String,
}

fn default_title() -> String {
    "Soul Contest".to_string()
}

fn default_duration_label() -> String {
    "2 months".to_string()
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            duration_label: default_duration_label(),
        }
    }
}

/// Dashboard settings
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_secs: u64,
}

fn default_top_n() -> usize {
    10
}

fn default_notice_ttl() -> u64 {
    3
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            notice_ttl_secs: default_notice_ttl(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.board.notice_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "board.notice_ttl_secs must be at least 1".to_string(),
            ));
        }
        self.roster.validate()?;
        Ok(())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// A config file that exists but fails to load is an error, not a
    /// reason to fall back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("soul-contest").join("config.toml")),
            Some(PathBuf::from("./soul-contest.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first_existing(&config_paths)
    }

    fn load_first_existing(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::info!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Board overrides
        if let Some(top_n) = var("SOUL_CONTEST_TOP_N") {
            if let Ok(n) = top_n.parse() {
                self.board.top_n = n;
            }
        }
        if let Some(ttl) = var("SOUL_CONTEST_NOTICE_TTL_SECS") {
            match ttl.parse() {
                Ok(secs) if secs > 0 => self.board.notice_ttl_secs = secs,
                _ => tracing::warn!("Ignoring SOUL_CONTEST_NOTICE_TTL_SECS={:?}", ttl),
            }
        }

        // Logging overrides
        if let Some(level) = var("SOUL_CONTEST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SOUL_CONTEST_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid roster: {0}")]
    InvalidRoster(#[from] RosterError),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Soul Contest Configuration
#
# Environment variables override these settings:
# - SOUL_CONTEST_TOP_N
# - SOUL_CONTEST_NOTICE_TTL_SECS
# - SOUL_CONTEST_LOG_LEVEL
# - SOUL_CONTEST_LOG_FORMAT

[contest]
# Title shown above the dashboard
title = "Soul Contest"

# Free-text contest duration
duration_label = "2 months"

[board]
# Size of the individual ranking
top_n = 10

# How long notices stay visible (seconds)
notice_ttl_secs = 3

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Seeded roster. Participants, activities, and staff cannot change at runtime.
# Teams: Agua, Fuego, Viento
# Activity kinds: riding, lab, doblete, salida_equipo, plancha, montana, despensa, reel
[roster]
participants = [
    { id = "1", name = "Ana García", team = "Agua" },
    { id = "2", name = "Carlos López", team = "Fuego" },
    { id = "3", name = "María Rodríguez", team = "Viento" },
]

staff = [
    { id = "1", name = "Marian" },
    { id = "2", name = "Brenda" },
    { id = "3", name = "MariLu" },
]

[[roster.activities]]
id = "1"
kind = "riding"
name = "1 clase de riding"
points = 2

[[roster.activities]]
id = "2"
kind = "lab"
name = "1 clase de lab"
points = 2

[[roster.activities]]
id = "3"
kind = "doblete"
name = "Doblete"
points = 1

[[roster.activities]]
id = "4"
kind = "salida_equipo"
name = "Salida con equipo"
points = 2
requires_evidence = true

[[roster.activities]]
id = "5"
kind = "plancha"
name = "2 min de plancha"
points = 2
requires_evidence = true

[[roster.activities]]
id = "6"
kind = "montana"
name = "2 min de montaña"
points = 2
requires_evidence = true

[[roster.activities]]
id = "7"
kind = "despensa"
name = "Traer despensa para donar"
points = 2
requires_evidence = true

[[roster.activities]]
id = "8"
kind = "reel"
name = "Reel de estilo de vida en Soul"
points = 2
requires_evidence = true
"#
    .to_string()
}
