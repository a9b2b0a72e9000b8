//! Create: write a record at `(tenant_id, record_id)`.

use std::str::FromStr;

use tkv_core::{decode_body, CreateRecordBody, OperationError, Record};
use tkv_store::RecordStore;

/// What Create does when a record already exists at the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreatePolicy {
    /// Fail with Conflict and leave the existing record untouched.
    #[default]
    Reject,
    /// Silently replace the existing record.
    Upsert,
}

impl CreatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Upsert => "upsert",
        }
    }
}

impl FromStr for CreatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "upsert" => Ok(Self::Upsert),
            other => Err(format!("unknown create policy \"{other}\", expected reject or upsert")),
        }
    }
}

/// Validate the body and store the record. Returns the stored record.
pub async fn create(
    store: &dyn RecordStore,
    policy: CreatePolicy,
    body: &[u8],
) -> Result<Record, OperationError> {
    let record = decode_body::<CreateRecordBody>(body)?.into_record()?;

    match policy {
        CreatePolicy::Reject => store.insert(record.clone()).await?,
        CreatePolicy::Upsert => store.put(record.clone()).await?,
    }

    tracing::info!(
        tenant_id = %record.tenant_id,
        record_id = %record.record_id,
        policy = policy.as_str(),
        "record created"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tkv_core::{RecordId, RecordKey, TenantId};
    use tkv_store::MemoryRecordStore;

    fn key(tenant: &str, record: &str) -> RecordKey {
        RecordKey::new(TenantId::new(tenant).unwrap(), RecordId::new(record).unwrap())
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("reject".parse::<CreatePolicy>().unwrap(), CreatePolicy::Reject);
        assert_eq!(" UPSERT ".parse::<CreatePolicy>().unwrap(), CreatePolicy::Upsert);
        assert!("overwrite".parse::<CreatePolicy>().is_err());
        assert_eq!(CreatePolicy::default(), CreatePolicy::Reject);
    }

    #[tokio::test]
    async fn create_stores_flat_body_as_record() {
        let store = MemoryRecordStore::new();
        let body = json!({"tenant_id": "PLAZA VEA", "record_id": "PVP01", "nombre": "Leche"});

        let record = create(&store, CreatePolicy::Reject, body.to_string().as_bytes())
            .await
            .unwrap();
        assert_eq!(record.attributes["nombre"], json!("Leche"));

        let stored = store.get(&key("PLAZA VEA", "PVP01")).await.unwrap();
        assert_eq!(stored, Some(record));
    }

    #[tokio::test]
    async fn reject_policy_conflicts_on_existing_key() {
        let store = MemoryRecordStore::new();
        let first = json!({"tenant_id": "A", "record_id": "1", "v": 1}).to_string();
        let second = json!({"tenant_id": "A", "record_id": "1", "v": 2}).to_string();

        create(&store, CreatePolicy::Reject, first.as_bytes()).await.unwrap();
        let err = create(&store, CreatePolicy::Reject, second.as_bytes())
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::AlreadyExists));

        let stored = store.get(&key("A", "1")).await.unwrap().unwrap();
        assert_eq!(stored.attributes["v"], json!(1));
    }

    #[tokio::test]
    async fn upsert_policy_overwrites() {
        let store = MemoryRecordStore::new();
        let first = json!({"tenant_id": "A", "record_id": "1", "v": 1}).to_string();
        let second = json!({"tenant_id": "A", "record_id": "1", "v": 2}).to_string();

        create(&store, CreatePolicy::Upsert, first.as_bytes()).await.unwrap();
        create(&store, CreatePolicy::Upsert, second.as_bytes()).await.unwrap();

        let stored = store.get(&key("A", "1")).await.unwrap().unwrap();
        assert_eq!(stored.attributes["v"], json!(2));
    }

    #[tokio::test]
    async fn missing_key_field_writes_nothing() {
        let store = MemoryRecordStore::new();
        let body = json!({"tenant_id": "A", "nombre": "x"}).to_string();
        let err = create(&store, CreatePolicy::Reject, body.as_bytes())
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::MissingField("record_id")));
        assert!(store.is_empty());
    }
}
