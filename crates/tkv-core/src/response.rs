//! # Operation Responses
//!
//! Successful response bodies for the five operations, plus the [`Status`]
//! classification shared by successes and failures.

use serde::{Deserialize, Serialize};

use crate::identity::{RecordId, RecordKey, TenantId};
use crate::record::{Attributes, Record};

/// Status classification of an operation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The operation completed.
    Ok,
    /// Token missing or invalid.
    Forbidden,
    /// A required field is missing or the body is malformed.
    BadRequest,
    /// Key-specific lookup found nothing.
    NotFound,
    /// A record already exists at the key.
    Conflict,
    /// The record store failed.
    Unavailable,
}

impl Status {
    /// Stable label, also used as the metrics `status` label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Forbidden => "forbidden",
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List result: every record in one partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRecordsResponse {
    /// The scanned partition.
    pub tenant_id: TenantId,
    /// Number of records returned.
    pub count: usize,
    /// Records in store-native order.
    pub records: Vec<Record>,
}

impl ListRecordsResponse {
    /// Wrap a scan result.
    pub fn new(tenant_id: TenantId, records: Vec<Record>) -> Self {
        Self {
            tenant_id,
            count: records.len(),
            records,
        }
    }
}

/// Get result. `record` is `None` when nothing exists at the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetRecordResponse {
    /// The record, if present.
    pub record: Option<Record>,
    /// Present only when the record is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GetRecordResponse {
    /// Point lookup hit.
    pub fn found(record: Record) -> Self {
        Self {
            record: Some(record),
            message: None,
        }
    }

    /// Point lookup miss.
    pub fn missing() -> Self {
        Self {
            record: None,
            message: Some("record not found".to_string()),
        }
    }

    /// Classification: `Ok` on a hit, `NotFound` on a miss.
    pub fn status(&self) -> Status {
        if self.record.is_some() {
            Status::Ok
        } else {
            Status::NotFound
        }
    }
}

impl From<Option<Record>> for GetRecordResponse {
    fn from(record: Option<Record>) -> Self {
        match record {
            Some(record) => Self::found(record),
            None => Self::missing(),
        }
    }
}

/// Update result: only the fields that changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecordResponse {
    /// Partition component of the updated key.
    pub tenant_id: TenantId,
    /// Record component of the updated key.
    pub record_id: RecordId,
    /// Changed fields with their new values.
    pub updated: Attributes,
}

impl UpdateRecordResponse {
    /// Build from the key and the changed fields.
    pub fn new(key: RecordKey, updated: Attributes) -> Self {
        Self {
            tenant_id: key.tenant_id,
            record_id: key.record_id,
            updated,
        }
    }
}

/// Delete confirmation. Returned whether or not the record existed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRecordResponse {
    /// Partition component of the deleted key.
    pub tenant_id: TenantId,
    /// Record component of the deleted key.
    pub record_id: RecordId,
    /// Fixed confirmation text.
    pub message: String,
}

impl DeleteRecordResponse {
    /// Confirmation for `key`.
    pub fn new(key: RecordKey) -> Self {
        Self {
            tenant_id: key.tenant_id,
            record_id: key.record_id,
            message: "record deleted".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key() -> RecordKey {
        RecordKey::new(
            TenantId::new("PLAZA VEA").unwrap(),
            RecordId::new("PVP01").unwrap(),
        )
    }

    #[test]
    fn status_serializes_screaming_case() {
        assert_eq!(serde_json::to_value(Status::BadRequest).unwrap(), json!("BAD_REQUEST"));
        assert_eq!(serde_json::to_value(Status::Ok).unwrap(), json!("OK"));
    }

    #[test]
    fn list_response_counts_records() {
        let tenant = TenantId::new("A").unwrap();
        let empty = ListRecordsResponse::new(tenant.clone(), vec![]);
        assert_eq!(empty.count, 0);
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            json!({"tenant_id": "A", "count": 0, "records": []})
        );
    }

    #[test]
    fn get_response_missing_shape() {
        let missing = GetRecordResponse::from(None);
        assert_eq!(missing.status(), Status::NotFound);
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({"record": null, "message": "record not found"})
        );
    }

    #[test]
    fn get_response_found_omits_message() {
        let found = GetRecordResponse::found(Record::new(key(), Default::default()));
        assert_eq!(found.status(), Status::Ok);
        let value = serde_json::to_value(&found).unwrap();
        assert!(value.get("message").is_none());
        assert_eq!(value["record"]["record_id"], json!("PVP01"));
    }

    #[test]
    fn delete_response_references_key() {
        let value = serde_json::to_value(DeleteRecordResponse::new(key())).unwrap();
        assert_eq!(
            value,
            json!({"tenant_id": "PLAZA VEA", "record_id": "PVP01", "message": "record deleted"})
        );
    }
}
