//! List: every record in one tenant's partition.

use tkv_core::{decode_body, ListRecordsBody, ListRecordsResponse, OperationError};
use tkv_store::RecordStore;

pub async fn list(
    store: &dyn RecordStore,
    body: &[u8],
) -> Result<ListRecordsResponse, OperationError> {
    let tenant = decode_body::<ListRecordsBody>(body)?.into_tenant()?;
    let records = store.scan(&tenant).await?;
    tracing::debug!(tenant_id = %tenant, count = records.len(), "partition scanned");
    Ok(ListRecordsResponse::new(tenant, records))
}
