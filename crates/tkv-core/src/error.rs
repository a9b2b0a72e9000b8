//! # Error Hierarchy
//!
//! Structured error types built with `thiserror`.
//!
//! [`ValidationError`] covers construction of domain primitives.
//! [`OperationError`] is the terminal outcome of a failed record operation;
//! each variant maps to exactly one [`Status`] classification.

use thiserror::Error;

use crate::response::Status;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Tenant identifier is empty or whitespace-only.
    #[error("invalid tenant_id: must be non-empty")]
    EmptyTenantId,

    /// Record identifier is empty or whitespace-only.
    #[error("invalid record_id: must be non-empty")]
    EmptyRecordId,

    /// The update mapping carries no fields.
    #[error("updates must contain at least one field")]
    EmptyUpdates,

    /// The update mapping names a key field, which is immutable.
    #[error("field \"{0}\" is part of the record key and cannot be updated")]
    KeyFieldUpdate(String),
}

/// Failure of one of the five record operations.
///
/// All variants are terminal for the current request. None are retried by
/// the access layer.
#[derive(Error, Debug)]
pub enum OperationError {
    /// Token missing, invalid, or the validator could not be reached.
    #[error("forbidden")]
    Forbidden,

    /// A required identifying field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The body is not valid JSON, has a field of the wrong type, or
    /// violates a body-level rule.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,

    /// A record already exists at the addressed key.
    #[error("record already exists")]
    AlreadyExists,

    /// The record store failed. The detail is for logs only.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl OperationError {
    /// Status classification for this error.
    pub fn status(&self) -> Status {
        match self {
            Self::Forbidden => Status::Forbidden,
            Self::MissingField(_) | Self::InvalidBody(_) => Status::BadRequest,
            Self::NotFound => Status::NotFound,
            Self::AlreadyExists => Status::Conflict,
            Self::StoreUnavailable(_) => Status::Unavailable,
        }
    }

    /// Stable, client-safe message.
    ///
    /// Forbidden and store failures use fixed text so that neither token
    /// verdict details nor store internals reach the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Forbidden => "forbidden".to_string(),
            Self::StoreUnavailable(_) => "record store unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for OperationError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyTenantId => Self::MissingField("tenant_id"),
            ValidationError::EmptyRecordId => Self::MissingField("record_id"),
            ValidationError::EmptyUpdates => Self::MissingField("updates"),
            ValidationError::KeyFieldUpdate(_) => Self::InvalidBody(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for OperationError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidBody(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_variant_has_one_status() {
        assert_eq!(OperationError::Forbidden.status(), Status::Forbidden);
        assert_eq!(
            OperationError::MissingField("tenant_id").status(),
            Status::BadRequest
        );
        assert_eq!(
            OperationError::InvalidBody("x".into()).status(),
            Status::BadRequest
        );
        assert_eq!(OperationError::NotFound.status(), Status::NotFound);
        assert_eq!(OperationError::AlreadyExists.status(), Status::Conflict);
        assert_eq!(
            OperationError::StoreUnavailable("pool timed out".into()).status(),
            Status::Unavailable
        );
    }

    #[test]
    fn store_detail_never_in_public_message() {
        let err = OperationError::StoreUnavailable("connection refused at 10.0.0.3".into());
        assert_eq!(err.public_message(), "record store unavailable");
        assert!(err.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn missing_field_message_names_field() {
        let err = OperationError::MissingField("record_id");
        assert_eq!(err.public_message(), "missing required field: record_id");
    }

    #[test]
    fn validation_errors_convert_to_missing_field() {
        assert!(matches!(
            OperationError::from(ValidationError::EmptyTenantId),
            OperationError::MissingField("tenant_id")
        ));
        assert!(matches!(
            OperationError::from(ValidationError::EmptyRecordId),
            OperationError::MissingField("record_id")
        ));
        assert!(matches!(
            OperationError::from(ValidationError::EmptyUpdates),
            OperationError::MissingField("updates")
        ));
    }

    #[test]
    fn key_field_update_converts_to_invalid_body() {
        let err = OperationError::from(ValidationError::KeyFieldUpdate("tenant_id".into()));
        match err {
            OperationError::InvalidBody(msg) => assert!(msg.contains("tenant_id")),
            other => panic!("expected InvalidBody, got: {other:?}"),
        }
    }
}
