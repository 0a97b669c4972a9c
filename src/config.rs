//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::BackendConfig;
use crate::refresh::RefreshConfig;
use crate::views::PanelSettings;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub panels: PanelSettings,

    #[serde(default)]
    pub refresh: RefreshSettings,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Statistics backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Per-request timeout, 0 for none
    #[serde(default)]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: 0,
        }
    }
}

impl BackendSettings {
    pub fn to_backend_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.url.clone(),
            request_timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
        }
    }
}

/// Refresh cadence
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSettings {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    #[serde(default = "default_clock_interval")]
    pub clock_interval_ms: u64,
}

fn default_interval() -> u64 {
    30
}

fn default_clock_interval() -> u64 {
    1000
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            clock_interval_ms: default_clock_interval(),
        }
    }
}

impl RefreshSettings {
    /// Zero intervals are raised to the minimum the timers accept
    pub fn to_refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            interval: Duration::from_secs(self.interval_secs.max(1)),
            clock_interval: Duration::from_millis(self.clock_interval_ms.max(1)),
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
    "info".to_string()
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

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("jule-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/jule-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("JULE_DASHBOARD_BACKEND_URL") {
            self.backend.url = url;
        }

        if let Some(host) = var("JULE_DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("JULE_DASHBOARD_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid JULE_DASHBOARD_PORT"),
            }
        }

        if let Some(secs) = var("JULE_DASHBOARD_REFRESH_SECS") {
            match secs.parse() {
                Ok(s) => self.refresh.interval_secs = s,
                Err(_) => {
                    tracing::warn!(value = %secs, "Ignoring invalid JULE_DASHBOARD_REFRESH_SECS")
                }
            }
        }

        if let Some(level) = var("JULE_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("JULE_DASHBOARD_LOG_FORMAT") {
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Jule Dashboard Configuration
#
# Environment variables override these settings:
# - JULE_DASHBOARD_BACKEND_URL
# - JULE_DASHBOARD_HOST
# - JULE_DASHBOARD_PORT
# - JULE_DASHBOARD_REFRESH_SECS
# - JULE_DASHBOARD_LOG_LEVEL
# - JULE_DASHBOARD_LOG_FORMAT

[backend]
# Statistics backend base URL
url = "http://localhost:8080"

# Per-request timeout in seconds (0 = wait indefinitely)
request_timeout_secs = 0

[panels]
# Number of leaderboard rows
leaderboard_limit = 10

# Spam log rows and look-back window
spam_limit = 20
spam_hours = 24

# Number of top songs
music_limit = 10

# Days of message activity to chart
activity_days = 7

# Activity chart labels: weekday ("Mon") or month_day ("May 3")
activity_labels = "weekday"

[refresh]
# Seconds between full refresh cycles
interval_secs = 30

# Live clock update interval (ms)
clock_interval_ms = 1000

[server]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 8090

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
