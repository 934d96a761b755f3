//! Error types for the analysis service
//!
//! Validation failures are the only error the core produces; the HTTP layer
//! wraps them in `ApiError` and maps each kind to a status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// A request (or assembled response) violated a field constraint
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced at the HTTP boundary
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed request body: {message}")]
    MalformedBody { status: StatusCode, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => {
                tracing::warn!(field = %err.field, "Rejected analysis request: {}", err.message);
                let body = Json(json!({
                    "error": "validation_error",
                    "field": err.field,
                    "message": err.message,
                }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            ApiError::MalformedBody { status, message } => {
                tracing::warn!(%status, "Malformed request body: {}", message);
                let body = Json(json!({ "error": "malformed_body", "message": message }));
                (status, body).into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal error.");
                let body = Json(json!({
                    "error": "internal_error",
                    "message": "An internal error occurred",
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },
}
