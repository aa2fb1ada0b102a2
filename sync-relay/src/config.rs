//! Configuration loading for sync-relay.
//!
//! Configuration is loaded from a TOML file (default: `relay.toml`). Every
//! section and field is optional.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for sync-relay.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub http: HttpConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Request limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Expiry sweep configuration.
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Bind address for the HTTP server (default: 0.0.0.0:8787).
    #[serde(default = "default_http_bind")]
    pub bind_address: String,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to SQLite database file; `:memory:` keeps records in memory.
    #[serde(default = "default_database_path")]
    pub database: PathBuf,
    /// Record time-to-live in seconds, reset on every write (default: 365 days).
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

/// Request limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes (default: 1MB).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Codes tried before giving up on allocation (default: 10).
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: u32,
}

/// Expiry sweep configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    /// Sweep interval in seconds (default: 3600 = 1 hour).
    #[serde(default = "default_cleanup_interval")]
    pub interval_secs: u64,
    /// Enable the sweep task (default: true).
    #[serde(default = "default_cleanup_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_http_bind() -> String {
    "0.0.0.0:8787".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("relay.db")
}

fn default_ttl() -> u64 {
    sync_types::RECORD_TTL_SECS
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1MB
}

fn default_max_code_attempts() -> u32 {
    10
}

fn default_cleanup_interval() -> u64 {
    3600 // 1 hour
}

fn default_cleanup_enabled() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: default_http_bind(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            ttl_secs: default_ttl(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            max_code_attempts: default_max_code_attempts(),
        }
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_cleanup_interval(),
            enabled: default_cleanup_enabled(),
        }
    }
}

impl StorageConfig {
    /// Record time-to-live as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Whether the database should live in memory only.
    pub fn is_in_memory(&self) -> bool {
        self.database.as_os_str() == ":memory:"
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
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
