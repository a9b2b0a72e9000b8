//! Get: point lookup by composite key.
//!
//! A miss is an empty result, not an error.

use tkv_core::{decode_body, OperationError, Record, RecordKeyBody};
use tkv_store::RecordStore;

pub async fn get(store: &dyn RecordStore, body: &[u8]) -> Result<Option<Record>, OperationError> {
    let key = decode_body::<RecordKeyBody>(body)?.into_key()?;
    Ok(store.get(&key).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tkv_core::{RecordId, RecordKey, TenantId};
    use tkv_store::MemoryRecordStore;

    #[tokio::test]
    async fn hit_returns_record() {
        let store = MemoryRecordStore::new();
        let key = RecordKey::new(TenantId::new("A").unwrap(), RecordId::new("1").unwrap());
        store.put(Record::new(key, Default::default())).await.unwrap();

        let body = json!({"tenant_id": "A", "record_id": "1"}).to_string();
        let found = get(&store, body.as_bytes()).await.unwrap();
        assert_eq!(found.map(|r| r.record_id.to_string()), Some("1".to_string()));
    }

    #[tokio::test]
    async fn miss_is_empty_result() {
        let store = MemoryRecordStore::new();
        let body = json!({"tenant_id": "A", "record_id": "1"}).to_string();
        assert!(get(&store, body.as_bytes()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn other_tenant_with_same_id_is_a_miss() {
        let store = MemoryRecordStore::new();
        let key = RecordKey::new(TenantId::new("B").unwrap(), RecordId::new("1").unwrap());
        store.put(Record::new(key, Default::default())).await.unwrap();

        let body = json!({"tenant_id": "A", "record_id": "1"}).to_string();
        assert!(get(&store, body.as_bytes()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_record_id_is_missing_field() {
        let store = MemoryRecordStore::new();
        let body = json!({"tenant_id": "A"}).to_string();
        let err = get(&store, body.as_bytes()).await.unwrap_err();
        assert!(matches!(err, OperationError::MissingField("record_id")));
    }
}
