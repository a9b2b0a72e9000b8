//! # tkv-store — Tenant-Partitioned Record Stores
//!
//! Defines the [`RecordStore`] contract consumed by the record operations
//! and ships two implementations:
//!
//! - [`MemoryRecordStore`] — process-local, `parking_lot`-guarded. Used for
//!   development and tests, and when `DATABASE_URL` is unset.
//! - [`PgRecordStore`] — PostgreSQL via SQLx, attributes stored as JSONB.
//!
//! ## Contract
//!
//! Every point operation is atomic for its single key. No operation spans
//! more than one key, and no store method ever reads or writes outside the
//! tenant named by its arguments.

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::StoreError;
pub use memory::MemoryRecordStore;
pub use postgres::{PgConfig, PgRecordStore};

use async_trait::async_trait;
use tkv_core::{Attributes, FieldUpdates, Record, RecordKey, TenantId};

/// Keyed store addressed by `(tenant_id, record_id)`.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Every record in `tenant`, in store-native order.
    async fn scan(&self, tenant: &TenantId) -> Result<Vec<Record>, StoreError>;

    /// The record at `key`, or `None`.
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, StoreError>;

    /// Write `record` at its key, replacing any existing record.
    async fn put(&self, record: Record) -> Result<(), StoreError>;

    /// Write `record` only if its key is vacant.
    ///
    /// Fails with [`StoreError::AlreadyExists`] otherwise.
    async fn insert(&self, record: Record) -> Result<(), StoreError>;

    /// Overwrite the named fields of the record at `key`, leaving every
    /// other field untouched. Returns the changed fields.
    ///
    /// Fails with [`StoreError::NotFound`] if no record exists at `key`.
    async fn merge(&self, key: &RecordKey, updates: &FieldUpdates)
        -> Result<Attributes, StoreError>;

    /// Ensure no record exists at `key`. Succeeds whether or not one did.
    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}
