//! HTTP error responses
//!
//! Validation failures become `400` with one entry per offending field.
//! Anything else becomes a generic `500`; the detail is logged, never sent.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use edudir_core::EdudirError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Where a rejected parameter came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
    Params,
}

/// One rejected request parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Parameter name
    pub field: String,
    /// Where the parameter was read from
    pub location: Location,
    /// Human readable reason
    pub message: String,
    /// Value as received, when there was one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl FieldError {
    /// Create a field error without an echoed value
    pub fn new<F: Into<String>, M: Into<String>>(field: F, location: Location, message: M) -> Self {
        Self {
            field: field.into(),
            location,
            message: message.into(),
            value: None,
        }
    }

    /// Attach the received value
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Body of a `400` response
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Body of every other error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a handler can return
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more request parameters are invalid
    #[error("Invalid request: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Route does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body exceeds the configured limit
    #[error("Payload too large")]
    PayloadTooLarge,

    /// Unexpected fault while handling the request
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Validation failure on a single field
    pub fn field(error: FieldError) -> Self {
        Self::Validation(vec![error])
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EdudirError> for ApiError {
    fn from(err: EdudirError) -> Self {
        Self::Internal(format!("[{}] {}", err.category(), err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("response serialization failed: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => {
                warn!(
                    fields = ?errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                    "Request validation failed"
                );
                (status, Json(ValidationErrorResponse { errors })).into_response()
            }
            ApiError::NotFound(path) => {
                warn!("No route for {}", path);
                (
                    status,
                    Json(ErrorResponse {
                        error: "Not found".to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::PayloadTooLarge => {
                warn!("Request body over size limit");
                (
                    status,
                    Json(ErrorResponse {
                        error: "Payload too large".to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::Internal(detail) => {
                error!("Internal error while handling request: {}", detail);
                (
                    status,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
