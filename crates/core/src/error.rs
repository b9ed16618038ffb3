//! Error handling for Edudir core library

use std::fmt;
use thiserror::Error;

/// Result type alias for Edudir operations
pub type Result<T> = std::result::Result<T, EdudirError>;

/// Main error type for Edudir operations
#[derive(Error, Debug)]
pub enum EdudirError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Dataset could not be loaded
    #[error("Failed to load dataset from {path}: {message}")]
    Load { path: String, message: String },

    /// Dataset header lacks a required column
    #[error("Dataset {path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    /// Network connectivity errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl EdudirError {
    /// Create a dataset load error
    pub fn load<P: Into<String>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column<P: Into<String>, S: Into<String>>(path: P, column: S) -> Self {
        Self::MissingColumn {
            path: path.into(),
            column: column.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for the errors that mean the dataset is unusable
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Load { .. } | Self::MissingColumn { .. } | Self::Csv(_)
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Csv(_) | Self::Load { .. } | Self::MissingColumn { .. } => {
                ErrorCategory::Dataset
            }
            Self::Json(_) => ErrorCategory::Serialization,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Network { .. } => ErrorCategory::Network,
            Self::Validation { .. } => ErrorCategory::Validation,
        }
    }
}

/// Error categories for logging
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    FileSystem,
    Dataset,
    Serialization,
    Configuration,
    Network,
    Validation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem => write!(f, "filesystem"),
            Self::Dataset => write!(f, "dataset"),
            Self::Serialization => write!(f, "serialization"),
            Self::Configuration => write!(f, "configuration"),
            Self::Network => write!(f, "network"),
            Self::Validation => write!(f, "validation"),
        }
    }
}
