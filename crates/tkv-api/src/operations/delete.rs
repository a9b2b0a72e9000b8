//! Delete: ensure no record exists at the key.
//!
//! Idempotent. There is no prior read, so deleting a missing record reports
//! the same success as deleting a present one.

use tkv_core::{decode_body, DeleteRecordResponse, OperationError, RecordKeyBody};
use tkv_store::RecordStore;

pub async fn delete(
    store: &dyn RecordStore,
    body: &[u8],
) -> Result<DeleteRecordResponse, OperationError> {
    let key = decode_body::<RecordKeyBody>(body)?.into_key()?;
    store.delete(&key).await?;
    tracing::info!(tenant_id = %key.tenant_id, record_id = %key.record_id, "record deleted");
    Ok(DeleteRecordResponse::new(key))
}
