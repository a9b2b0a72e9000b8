//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`OperationError`] from the record operations to HTTP status codes
//! and a stable JSON body. Forbidden and store failures carry fixed
//! messages; internal detail never reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tkv_core::OperationError;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "FORBIDDEN", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
///
/// Each variant carries the client-facing message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing field or malformed body (400).
    #[error("{0}")]
    BadRequest(String),

    /// Token missing, invalid, or unverifiable (403).
    #[error("forbidden")]
    Forbidden,

    /// Addressed record does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// A record already exists at the key (409).
    #[error("{0}")]
    Conflict(String),

    /// A backing dependency is unavailable (503).
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Convert record operation failures to API errors.
///
/// Uses [`OperationError::public_message`], so store detail is dropped here.
impl From<OperationError> for AppError {
    fn from(err: OperationError) -> Self {
        let message = err.public_message();
        match err {
            OperationError::Forbidden => Self::Forbidden,
            OperationError::MissingField(_) | OperationError::InvalidBody(_) => {
                Self::BadRequest(message)
            }
            OperationError::NotFound => Self::NotFound(message),
            OperationError::AlreadyExists => Self::Conflict(message),
            OperationError::StoreUnavailable(_) => Self::ServiceUnavailable(message),
        }
    }
}
