//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Title shown in the browser tab and page header
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Page layout: "wide" or "centered"
    #[serde(default = "default_layout")]
    pub layout: String,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_page_title() -> String {
    "NEUROWAKE".to_string()
}

fn default_layout() -> String {
    "wide".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            page_title: default_page_title(),
            layout: default_layout(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the page should span the full browser width
    pub fn is_wide(&self) -> bool {
        self.layout.eq_ignore_ascii_case("wide")
    }
}

/// Per-browser session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds of inactivity after which a session is discarded
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Upper bound on live sessions; the least recently used one is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// How often the background sweep purges expired sessions
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_idle_timeout() -> u64 {
    3600 // 1 hour
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            max_sessions: default_max_sessions(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        // A zero interval would make tokio's interval panic
        Duration::from_secs(self.sweep_interval_secs.max(1))
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
    ///
    /// Nothing is logged here; logging is configured from the result, so the
    /// caller reports [`ConfigLoad::source`] and [`ConfigLoad::errors`] once
    /// the subscriber is installed.
    pub fn load_default() -> ConfigLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("neurowake").join("config.toml")),
            Some(PathBuf::from("/etc/neurowake/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_from_paths(&config_paths, |key| std::env::var(key).ok())
    }

    /// Load the first existing path that parses, skipping broken ones
    pub(crate) fn load_from_paths<F>(paths: &[PathBuf], lookup: F) -> ConfigLoad
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(mut config) => {
                    config.apply_overrides(&lookup);
                    return ConfigLoad {
                        config,
                        source: Some(path.clone()),
                        errors,
                    };
                }
                Err(e) => errors.push(e),
            }
        }

        let mut config = Config::default();
        config.apply_overrides(&lookup);
        ConfigLoad {
            config,
            source: None,
            errors,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (environment in production)
    pub(crate) fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(host) = lookup("NEUROWAKE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("NEUROWAKE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Session overrides
        if let Some(ttl) = lookup("NEUROWAKE_SESSION_TTL_SECS") {
            if let Ok(secs) = ttl.parse() {
                self.session.idle_timeout_secs = secs;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("NEUROWAKE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("NEUROWAKE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of searching the default config locations
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from, `None` for defaults plus environment
    pub source: Option<PathBuf>,
    /// Files that exist but could not be loaded, in search order
    pub errors: Vec<ConfigError>,
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
    r#"# Neurowake Configuration
#
# Environment variables override these settings:
# - NEUROWAKE_HOST
# - NEUROWAKE_PORT
# - NEUROWAKE_SESSION_TTL_SECS
# - NEUROWAKE_LOG_LEVEL
# - NEUROWAKE_LOG_FORMAT

[server]
# Address to bind the dashboard to
host = "127.0.0.1"

# Port to listen on
port = 8501

# Title shown in the browser tab and page header
page_title = "NEUROWAKE"

# Page layout: wide or centered
layout = "wide"

# Allowed CORS origins for the JSON API (empty = same-origin only)
cors_origins = []

[session]
# Seconds of inactivity before a browser session is discarded
idle_timeout_secs = 3600

# Maximum number of live sessions kept in memory
max_sessions = 10000

# How often expired sessions are swept (seconds)
sweep_interval_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
