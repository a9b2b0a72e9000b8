//! # Operation Request Bodies
//!
//! Bodies as they arrive from the caller. Identifying fields are optional
//! at this stage so that an absent field can be reported as
//! [`OperationError::MissingField`] rather than as a parse failure. Blank
//! strings count as absent.
//!
//! | Operation | Body                  | Required                         |
//! |-----------|-----------------------|----------------------------------|
//! | Create    | [`CreateRecordBody`]  | `tenant_id`, `record_id`         |
//! | List      | [`ListRecordsBody`]   | `tenant_id`                      |
//! | Get       | [`RecordKeyBody`]     | `tenant_id`, `record_id`         |
//! | Update    | [`UpdateRecordBody`]  | `tenant_id`, `record_id`, `updates` |
//! | Delete    | [`RecordKeyBody`]     | `tenant_id`, `record_id`         |

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::OperationError;
use crate::identity::{RecordId, RecordKey, TenantId};
use crate::record::{Attributes, FieldUpdates, Record};

/// Decode a raw body. An empty body decodes as `{}` so that missing
/// fields surface as `MissingField` instead of a parse error.
///
/// # Errors
///
/// Returns [`OperationError::InvalidBody`] if the bytes are not a JSON
/// object matching `T`.
pub fn decode_body<T: DeserializeOwned>(raw: &[u8]) -> Result<T, OperationError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_str("{}")?);
    }
    Ok(serde_json::from_slice(raw)?)
}

fn require_tenant(value: Option<String>) -> Result<TenantId, OperationError> {
    value
        .and_then(|v| TenantId::new(v).ok())
        .ok_or(OperationError::MissingField("tenant_id"))
}

fn require_record(value: Option<String>) -> Result<RecordId, OperationError> {
    value
        .and_then(|v| RecordId::new(v).ok())
        .ok_or(OperationError::MissingField("record_id"))
}

/// Create body: key fields plus any attribute fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecordBody {
    /// Partition of the new record.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Identifier of the new record.
    #[serde(default)]
    pub record_id: Option<String>,
    /// Every other field in the body.
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl CreateRecordBody {
    /// Validate into a [`Record`].
    ///
    /// # Errors
    ///
    /// [`OperationError::MissingField`] if either key field is absent.
    pub fn into_record(self) -> Result<Record, OperationError> {
        let tenant_id = require_tenant(self.tenant_id)?;
        let record_id = require_record(self.record_id)?;
        Ok(Record::new(
            RecordKey::new(tenant_id, record_id),
            self.attributes,
        ))
    }
}

/// List body: the partition to scan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRecordsBody {
    /// Partition to scan.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl ListRecordsBody {
    /// Validate into a [`TenantId`].
    ///
    /// # Errors
    ///
    /// [`OperationError::MissingField`] if `tenant_id` is absent.
    pub fn into_tenant(self) -> Result<TenantId, OperationError> {
        require_tenant(self.tenant_id)
    }
}

/// Get and Delete body: a composite key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordKeyBody {
    /// Partition component.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Record component.
    #[serde(default)]
    pub record_id: Option<String>,
}

impl RecordKeyBody {
    /// Validate into a [`RecordKey`].
    ///
    /// # Errors
    ///
    /// [`OperationError::MissingField`] if either component is absent.
    pub fn into_key(self) -> Result<RecordKey, OperationError> {
        let tenant_id = require_tenant(self.tenant_id)?;
        let record_id = require_record(self.record_id)?;
        Ok(RecordKey::new(tenant_id, record_id))
    }
}

/// Update body: a composite key and the fields to overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecordBody {
    /// Partition component.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Record component.
    #[serde(default)]
    pub record_id: Option<String>,
    /// Fields to overwrite with their new values.
    #[serde(default)]
    pub updates: Option<Attributes>,
}

impl UpdateRecordBody {
    /// Validate into a key and a non-empty [`FieldUpdates`].
    ///
    /// # Errors
    ///
    /// - [`OperationError::MissingField`] if a key component or `updates`
    ///   is absent, or `updates` is empty.
    /// - [`OperationError::InvalidBody`] if `updates` names a key field.
    pub fn into_parts(self) -> Result<(RecordKey, FieldUpdates), OperationError> {
        let tenant_id = require_tenant(self.tenant_id)?;
        let record_id = require_record(self.record_id)?;
        let updates = self.updates.ok_or(OperationError::MissingField("updates"))?;
        let updates = FieldUpdates::new(updates)?;
        Ok((RecordKey::new(tenant_id, record_id), updates))
    }
}
