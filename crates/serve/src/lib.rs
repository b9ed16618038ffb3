//! Edudir Serve Library
//!
//! HTTP interface for the Edudir directory: routes, validation, response
//! caching and the middleware stack around them.

use edudir_core::AppConfig;

pub mod api;
pub mod cache;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod validation;

pub use error::ApiError;
pub use handlers::AppState;
pub use server::*;

use cache::ResponseCacheConfig;
use middleware::RateLimitConfig;

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runtime server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub max_request_size: usize,
    /// `None` disables response caching
    pub cache: Option<ResponseCacheConfig>,
    /// `None` disables rate limiting
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_enabled: true,
            max_request_size: 1024 * 1024, // 1MB
            cache: Some(ResponseCacheConfig::default()),
            rate_limit: Some(RateLimitConfig::default()),
        }
    }
}

impl From<&AppConfig> for ServerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            cors_enabled: config.server.cors_enabled,
            max_request_size: config.server.max_request_size,
            cache: config
                .cache
                .enabled
                .then(|| ResponseCacheConfig::from(&config.cache)),
            rate_limit: config
                .rate_limit
                .enabled
                .then(|| RateLimitConfig::from(&config.rate_limit)),
        }
    }
}
