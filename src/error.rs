//! Error types for the order service
//!
//! One `thiserror` enum per concern. Only [`AppError`] ever reaches an HTTP
//! response; cache and notification errors are recovered where they occur.

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error ==
/// Failures of the relational order store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection, query or commit failed
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    /// A row could not be mapped back into an order
    #[error("Corrupt order row: {0}")]
    CorruptRow(String),
}

// == Cache Error ==
/// Failures of a cache backend or of the snapshot codec.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend could not be reached or answered with a server error
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    /// Backend rejected the request (key too long, value too large, ...)
    #[error("Invalid cache request: {0}")]
    InvalidRequest(String),

    /// Stored bytes are not a valid order list snapshot
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

// == Notify Error ==
/// Failures talking to the notification service.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification transport failed: {0}")]
    Transport(String),

    #[error("Notification service answered with status {0}")]
    Rejected(u16),
}

// == App Error ==
/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input, reported before any store interaction
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The order store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Undecodable form bodies share the validation error shape.
impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers and the order paths.
pub type Result<T> = std::result::Result<T, AppError>;
