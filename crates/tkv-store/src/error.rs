//! Store error type and its mapping onto the operation taxonomy.

use thiserror::Error;
use tkv_core::{OperationError, RecordKey};

/// Failure of a [`RecordStore`](crate::RecordStore) call.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record at the key (merge only).
    #[error("no record at {0}")]
    NotFound(RecordKey),

    /// A record already occupies the key (insert only).
    #[error("record already exists at {0}")]
    AlreadyExists(RecordKey),

    /// The backing store could not be reached or rejected the query.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A persisted row could not be turned back into a record.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// Schema migration failed at startup.
    #[error("migration failed: {0}")]
    Migration(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(err.to_string())
    }
}

impl From<StoreError> for OperationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound,
            StoreError::AlreadyExists(_) => Self::AlreadyExists,
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}
