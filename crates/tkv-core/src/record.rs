//! # Record Model
//!
//! A [`Record`] is a composite key plus an open attribute mapping. The
//! access layer never inspects attribute values; it only forwards them.
//!
//! The wire form is flat: key fields and attributes share one JSON object,
//! e.g. `{"tenant_id": "PLAZA VEA", "record_id": "PVP01", "nombre": "Leche"}`.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{RecordId, RecordKey, TenantId};

/// Open mapping from attribute name to an opaque JSON value.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Field names reserved for the composite key.
pub const KEY_FIELDS: [&str; 2] = ["tenant_id", "record_id"];

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Partition the record belongs to.
    pub tenant_id: TenantId,
    /// Identifier within the partition.
    pub record_id: RecordId,
    /// Every non-key field.
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Record {
    /// Build a record at `key`. Key fields are stripped from `attributes`
    /// so the key cannot be shadowed by an attribute of the same name.
    pub fn new(key: RecordKey, mut attributes: Attributes) -> Self {
        for field in KEY_FIELDS {
            attributes.remove(field);
        }
        Self {
            tenant_id: key.tenant_id,
            record_id: key.record_id,
            attributes,
        }
    }

    /// The composite key of this record.
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.tenant_id.clone(), self.record_id.clone())
    }
}

/// Validated, non-empty set of attribute updates.
///
/// Never names a key field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdates(Attributes);

impl FieldUpdates {
    /// Validate an update mapping.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyUpdates`] if the mapping has no fields.
    /// - [`ValidationError::KeyFieldUpdate`] if it names `tenant_id` or
    ///   `record_id`.
    pub fn new(fields: Attributes) -> Result<Self, ValidationError> {
        if fields.is_empty() {
            return Err(ValidationError::EmptyUpdates);
        }
        if let Some(field) = KEY_FIELDS.iter().find(|f| fields.contains_key(**f)) {
            return Err(ValidationError::KeyFieldUpdate((*field).to_string()));
        }
        Ok(Self(fields))
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &Attributes {
        &self.0
    }

    /// Partial merge into `attributes`. Only the named fields are written;
    /// every other attribute is left as it was. Returns the changed fields
    /// with their new values.
    pub fn apply_to(&self, attributes: &mut Attributes) -> Attributes {
        for (field, value) in &self.0 {
            attributes.insert(field.clone(), value.clone());
        }
        self.0.clone()
    }
}
