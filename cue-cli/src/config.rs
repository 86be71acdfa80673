//! Configuration loading for cuedeck.
//!
//! Configuration is loaded from a TOML file. Without `--config`, the platform
//! config directory is checked for `config.toml`; if it is absent, defaults
//! are used.

use cue_client::{AnkiConnectConfig, PollConfig, RefreshPolicy, DEFAULT_API_VERSION, DEFAULT_ENDPOINT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Root configuration for cuedeck.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Flashcard service configuration.
    #[serde(default)]
    pub flashcards: FlashcardsConfig,
    /// Background polling configuration.
    #[serde(default)]
    pub poll: PollSection,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Flashcard service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FlashcardsConfig {
    /// AnkiConnect URL (default: http://127.0.0.1:8765).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in seconds (default: 5).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// AnkiConnect protocol version (default: 6).
    #[serde(default = "default_api_version")]
    pub api_version: u32,
    /// How overlapping refreshes are reconciled (default: last_write_wins).
    #[serde(default)]
    pub refresh_policy: RefreshPolicy,
}

/// Background polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PollSection {
    /// Seconds between liveness checks in `watch` (default: 10).
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
    /// Enable polling (default: true).
    #[serde(default = "default_poll_enabled")]
    pub enabled: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is not set (default: "warn").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default value functions
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_api_version() -> u32 {
    DEFAULT_API_VERSION
}

fn default_poll_interval() -> u64 {
    10
}

fn default_poll_enabled() -> bool {
    true
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for FlashcardsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
            api_version: default_api_version(),
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
            enabled: default_poll_enabled(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load from `explicit` if given, else from the default location if a
    /// file exists there, else defaults.
    ///
    /// # Errors
    ///
    /// An explicitly given file must exist and parse. A default-location file
    /// that exists must parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Settings for the AnkiConnect HTTP client.
    pub fn anki_config(&self) -> AnkiConnectConfig {
        AnkiConnectConfig {
            api_version: self.flashcards.api_version,
            request_timeout: Duration::from_secs(self.flashcards.request_timeout_secs),
        }
    }

    /// Settings for the background poller.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.poll.interval_secs.max(1)),
            enabled: self.poll.enabled,
        }
    }
}

/// Platform config location, e.g. `~/.config/cuedeck/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "cuedeck", "cuedeck")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
