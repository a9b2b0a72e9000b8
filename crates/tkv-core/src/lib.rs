#![deny(missing_docs)]

//! # tkv-core — Foundational Types for the Tenant Record Service
//!
//! Every other crate in the workspace depends on this one. It has no
//! internal crate dependencies and performs no I/O — only `serde`,
//! `serde_json`, and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for key components.** A [`TenantId`] cannot be
//!    passed where a [`RecordId`] is expected, and neither can be empty.
//!
//! 2. **One composite key.** [`RecordKey`] is the only way to address a
//!    single record, so every point operation is tenant-scoped by type.
//!
//! 3. **Bodies validate into domain types.** Request bodies arrive with
//!    optional fields; `into_*` conversions turn them into keys, records,
//!    and [`FieldUpdates`] or fail with an [`OperationError`].
//!
//! 4. **One error taxonomy.** [`OperationError`] classifies every failure
//!    into a fixed [`Status`].

pub mod error;
pub mod identity;
pub mod record;
pub mod request;
pub mod response;

pub use error::{OperationError, ValidationError};
pub use identity::{RecordId, RecordKey, TenantId};
pub use record::{Attributes, FieldUpdates, Record, KEY_FIELDS};
pub use request::{
    decode_body, CreateRecordBody, ListRecordsBody, RecordKeyBody, UpdateRecordBody,
};
pub use response::{
    DeleteRecordResponse, GetRecordResponse, ListRecordsResponse, Status, UpdateRecordResponse,
};
