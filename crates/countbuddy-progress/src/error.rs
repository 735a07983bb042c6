//! Progress service error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors returned by the progress store and service.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// No record with the requested id.
    #[error("Kid not found")]
    NotFound,

    /// Another record already uses this kid name.
    #[error("kid name already exists: {0}")]
    Duplicate(String),

    /// The request body was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The service could not be reached or answered with garbage.
    #[error("network error: {0}")]
    Network(String),
}

impl ProgressError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProgressError::NotFound => StatusCode::NOT_FOUND,
            ProgressError::Duplicate(_) | ProgressError::Validation(_) => StatusCode::BAD_REQUEST,
            ProgressError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProgressError::Network(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Machine-readable error kind sent alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ProgressError::NotFound => "not_found",
            ProgressError::Duplicate(_) => "duplicate",
            ProgressError::Validation(_) => "validation",
            ProgressError::Storage(_) => "storage",
            ProgressError::Network(_) => "network",
        }
    }

    /// Rebuild an error from a service response body.
    pub fn from_wire(status: u16, kind: &str, message: String) -> Self {
        match (status, kind) {
            (404, _) | (_, "not_found") => ProgressError::NotFound,
            (_, "duplicate") => ProgressError::Duplicate(message),
            (_, "validation") => ProgressError::Validation(message),
            _ => ProgressError::Storage(format!("HTTP {status}: {message}")),
        }
    }
}

impl IntoResponse for ProgressError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "progress request failed");
        } else {
            tracing::debug!(error = %self, kind = self.kind(), "progress request rejected");
        }
        let body = json!({ "message": self.to_string(), "kind": self.kind() });
        (status, Json(body)).into_response()
    }
}
