//! Configuration types for Edudir
//!
//! Settings are layered with the `config` crate: compiled defaults, then an
//! optional file, then `EDUDIR__`-prefixed environment variables
//! (`EDUDIR__SERVER__PORT=8080`). CLI flags are applied by the binary on top.

use crate::record::Schema;
use crate::{EdudirError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EDUDIR";

/// Log formats understood by [`crate::init_logging_with_config`]
pub const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerSettings,
    /// Source data settings
    pub dataset: DatasetSettings,
    /// Response cache settings
    pub cache: CacheSettings,
    /// Global rate limit settings
    pub rate_limit: RateLimitSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    /// Maximum request body size in bytes
    pub max_request_size: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_enabled: true,
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

/// Source data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// CSV file loaded at startup
    pub path: PathBuf,
    /// Column names for name, state and district
    pub columns: Schema,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/colleges.csv"),
            columns: Schema::default(),
        }
    }
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    /// Seconds an entry lives after it is stored
    pub ttl_seconds: u64,
    /// Upper bound on the bytes held by cached keys and bodies
    pub max_bytes: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 600,
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Global rate limit settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub enabled: bool,
    /// Requests allowed per window
    pub max_requests: u32,
    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_seconds: 60,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `edudir_serve=debug`
    pub level: String,
    /// One of `json`, `pretty`, `compact`
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns `EdudirError::Config` if a source cannot be read or parsed and
    /// `EdudirError::Validation` if the merged values are invalid.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(EdudirError::validation("server.port cannot be 0"));
        }

        if self.server.max_request_size == 0 {
            return Err(EdudirError::validation(
                "server.max_request_size must be greater than 0",
            ));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(EdudirError::validation(
                "cache.ttl_seconds must be greater than 0",
            ));
        }

        if self.cache.max_bytes == 0 {
            return Err(EdudirError::validation(
                "cache.max_bytes must be greater than 0",
            ));
        }

        if self.rate_limit.max_requests == 0 || self.rate_limit.window_seconds == 0 {
            return Err(EdudirError::validation(
                "rate_limit.max_requests and rate_limit.window_seconds must be greater than 0",
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(EdudirError::validation(format!(
                "Unknown log format: {}",
                self.logging.format
            )));
        }

        for column in self.dataset.columns.required_columns() {
            if column.trim().is_empty() {
                return Err(EdudirError::validation(
                    "dataset.columns entries cannot be empty",
                ));
            }
        }

        Ok(())
    }
}
