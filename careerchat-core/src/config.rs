//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/careerchat/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/careerchat/` (~/.config/careerchat/)
//! - Data: `$XDG_DATA_HOME/careerchat/` (~/.local/share/careerchat/)
//! - State/Logs: `$XDG_STATE_HOME/careerchat/` (~/.local/state/careerchat/)

use crate::error::{Error, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage paths
    #[serde(default)]
    pub store: StoreConfig,

    /// External answer-service configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (credentials are sent, so no wildcard)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

/// Storage paths
#[derive(Debug, Deserialize, Default, Clone)]
pub struct StoreConfig {
    /// Override path for the SQLite database
    pub database_path: Option<PathBuf>,

    /// Path to the flat-file FAQ dataset; when set, the file store is used
    /// instead of the SQLite-backed FAQ table
    pub faq_file: Option<PathBuf>,
}

/// External answer-service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Base URL of the answer service (e.g. `http://localhost:8000`)
    pub base_url: Option<String>,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_request_timeout(),
        }
    }
}

impl ModelConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base_url {
            if url.trim().is_empty() {
                return Err(Error::Config("model.base_url must not be empty".to_string()));
            }
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "model.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

/// Analytics configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// IANA timezone name for period bucketing
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Default limit for the recent-interactions feed
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Default N for the top-questions table
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            recent_limit: default_recent_limit(),
            top_n: default_top_n(),
        }
    }
}

impl AnalyticsConfig {
    /// Parse the configured timezone name
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| Error::Config(format!("unknown timezone: {}", self.timezone)))
    }
}

fn default_timezone() -> String {
    "Pacific/Auckland".to_string()
}

fn default_recent_limit() -> usize {
    100
}

fn default_top_n() -> usize {
    5
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.model.validate()?;
        config.analytics.tz()?;

        Ok(config)
    }

    /// Returns the default config file path
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("careerchat").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite database)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("careerchat")
    }

    /// Returns the state directory path (for logs)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("careerchat")
    }

    /// Returns the database file path, honoring the config override
    pub fn database_path(&self) -> PathBuf {
        self.store
            .database_path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("data.db"))
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("careerchat.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.analytics.recent_limit, 100);
        assert_eq!(config.analytics.top_n, 5);
        assert_eq!(config.analytics.timezone, "Pacific/Auckland");
        assert!(config.analytics.tz().is_ok());
        assert!(config.model.base_url.is_none());
        assert_eq!(config.model.connect_timeout_secs, 5);
        assert_eq!(config.model.timeout_secs, 10);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
port = 8080
allowed_origins = ["https://careers.example.ac.nz"]

[model]
base_url = "http://localhost:8000"
timeout_secs = 15

[analytics]
timezone = "UTC"
top_n = 10

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://careers.example.ac.nz"]
        );
        assert_eq!(config.model.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.model.timeout_secs, 15);
        assert_eq!(config.analytics.timezone, "UTC");
        assert_eq!(config.analytics.top_n, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_model_config_validation() {
        let config = ModelConfig::default();
        assert!(config.validate().is_ok());

        let config = ModelConfig {
            base_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ModelConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_timezone_rejected() {
        let config = AnalyticsConfig {
            timezone: "Middle/Nowhere".to_string(),
            ..Default::default()
        };
        assert!(config.tz().is_err());
    }
}
