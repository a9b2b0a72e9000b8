//! Update: partial merge into an existing record.
//!
//! Only the named fields change. A missing record is `NotFound`; Update
//! never creates.

use tkv_core::{decode_body, OperationError, UpdateRecordBody, UpdateRecordResponse};
use tkv_store::RecordStore;

pub async fn update(
    store: &dyn RecordStore,
    body: &[u8],
) -> Result<UpdateRecordResponse, OperationError> {
    let (key, updates) = decode_body::<UpdateRecordBody>(body)?.into_parts()?;
    let changed = store.merge(&key, &updates).await?;
    tracing::info!(
        tenant_id = %key.tenant_id,
        record_id = %key.record_id,
        fields = changed.len(),
        "record updated"
    );
    Ok(UpdateRecordResponse::new(key, changed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tkv_core::{Record, RecordId, RecordKey, TenantId};
    use tkv_store::MemoryRecordStore;

    fn key() -> RecordKey {
        RecordKey::new(TenantId::new("A").unwrap(), RecordId::new("1").unwrap())
    }

    #[tokio::test]
    async fn changes_only_named_fields() {
        let store = MemoryRecordStore::new();
        let attrs = json!({"nombre": "Leche", "marca": "Gloria"}).as_object().cloned().unwrap();
        store.put(Record::new(key(), attrs)).await.unwrap();

        let body = json!({"tenant_id": "A", "record_id": "1", "updates": {"nombre": "X"}});
        let resp = update(&store, body.to_string().as_bytes()).await.unwrap();
        assert_eq!(serde_json::to_value(&resp.updated).unwrap(), json!({"nombre": "X"}));

        let stored = store.get(&key()).await.unwrap().unwrap();
        assert_eq!(stored.attributes["nombre"], json!("X"));
        assert_eq!(stored.attributes["marca"], json!("Gloria"));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let store = MemoryRecordStore::new();
        let body = json!({"tenant_id": "A", "record_id": "1", "updates": {"nombre": "X"}});
        let err = update(&store, body.to_string().as_bytes()).await.unwrap_err();
        assert!(matches!(err, OperationError::NotFound));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn empty_updates_is_missing_field() {
        let store = MemoryRecordStore::new();
        let body = json!({"tenant_id": "A", "record_id": "1", "updates": {}});
        let err = update(&store, body.to_string().as_bytes()).await.unwrap_err();
        assert!(matches!(err, OperationError::MissingField("updates")));
    }
}
