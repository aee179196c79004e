pub mod admin;
pub mod auth;
pub mod bookings;
pub mod docs;
pub mod health;
pub mod monitoring;
pub mod payments;
pub mod services;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

// ─── Unified error type ──────────────────────────────────────────

/// Every handler error maps to a status code plus the JSON envelope
/// `{"error": <message>, "status": <code>}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error":  message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Path ids arrive as strings so a bad one can produce the API's own
/// 400 envelope instead of the framework's plain-text rejection.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<u64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {what} ID")))
}
