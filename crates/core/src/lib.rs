//! Edudir Core Library
//!
//! Core functionality for the Edudir directory service: the record model,
//! the CSV-backed in-memory dataset, name normalization, pagination, the
//! query engine and configuration.

pub mod config;
pub mod dataset;
pub mod error;
pub mod normalizer;
pub mod pagination;
pub mod query;
pub mod record;

// Re-export commonly used types
pub use config::AppConfig;
pub use dataset::Dataset;
pub use error::{EdudirError, ErrorCategory, Result};
pub use normalizer::normalize_name;
pub use pagination::{Page, PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use query::QueryEngine;
pub use record::{Record, Schema};

/// Initialize logging with custom configuration
///
/// `level` is an `EnvFilter` directive; `RUST_LOG` takes precedence when set.
pub fn init_logging_with_config(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "pretty" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => {
            return Err(EdudirError::validation(format!(
                "Unknown log format: {}",
                format
            )));
        }
    };

    result.map_err(|e| EdudirError::validation(format!("Failed to initialize logger: {}", e)))
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
