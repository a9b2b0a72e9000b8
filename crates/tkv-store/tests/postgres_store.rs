//! PgRecordStore against a live database.
//!
//! Run with:
//!
//! ```text
//! TKV_TEST_DATABASE_URL=postgres://localhost/tkv_test cargo test -p tkv-store -- --ignored
//! ```
//!
//! Each test uses its own tenant so runs do not interfere.

use serde_json::json;
use tkv_core::{FieldUpdates, Record, RecordId, RecordKey, TenantId};
use tkv_store::{PgConfig, PgRecordStore, RecordStore, StoreError};

async fn store() -> PgRecordStore {
    let url = std::env::var("TKV_TEST_DATABASE_URL").unwrap();
    PgRecordStore::connect(&PgConfig::new(url)).await.unwrap()
}

fn key(tenant: &str, record: &str) -> RecordKey {
    RecordKey::new(TenantId::new(tenant).unwrap(), RecordId::new(record).unwrap())
}

fn record(tenant: &str, id: &str, attrs: serde_json::Value) -> Record {
    Record::new(key(tenant, id), attrs.as_object().cloned().unwrap())
}

async fn clear(store: &PgRecordStore, tenant: &str) {
    let tenant_id = TenantId::new(tenant).unwrap();
    for r in store.scan(&tenant_id).await.unwrap() {
        store.delete(&r.key()).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires TKV_TEST_DATABASE_URL"]
async fn lifecycle_roundtrip() {
    let store = store().await;
    let tenant = "pg-lifecycle";
    clear(&store, tenant).await;

    store
        .insert(record(tenant, "PVP01", json!({"nombre": "Leche", "marca": "Gloria"})))
        .await
        .unwrap();
    let fetched = store.get(&key(tenant, "PVP01")).await.unwrap().unwrap();
    assert_eq!(fetched.attributes["nombre"], json!("Leche"));

    let updates = FieldUpdates::new(json!({"nombre": "Leche Nueva"}).as_object().cloned().unwrap())
        .unwrap();
    let changed = store.merge(&key(tenant, "PVP01"), &updates).await.unwrap();
    assert_eq!(changed["nombre"], json!("Leche Nueva"));

    let fetched = store.get(&key(tenant, "PVP01")).await.unwrap().unwrap();
    assert_eq!(fetched.attributes["nombre"], json!("Leche Nueva"));
    assert_eq!(fetched.attributes["marca"], json!("Gloria"));

    store.delete(&key(tenant, "PVP01")).await.unwrap();
    store.delete(&key(tenant, "PVP01")).await.unwrap();
    assert!(store.get(&key(tenant, "PVP01")).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires TKV_TEST_DATABASE_URL"]
async fn insert_conflict_and_merge_missing() {
    let store = store().await;
    let tenant = "pg-conflict";
    clear(&store, tenant).await;

    store.insert(record(tenant, "1", json!({}))).await.unwrap();
    let err = store.insert(record(tenant, "1", json!({}))).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(_)));

    let updates = FieldUpdates::new(json!({"x": 1}).as_object().cloned().unwrap()).unwrap();
    let err = store.merge(&key(tenant, "missing"), &updates).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires TKV_TEST_DATABASE_URL"]
async fn scan_is_scoped_and_ordered() {
    let store = store().await;
    clear(&store, "pg-scan-a").await;
    clear(&store, "pg-scan-b").await;

    store.put(record("pg-scan-a", "2", json!({}))).await.unwrap();
    store.put(record("pg-scan-a", "1", json!({}))).await.unwrap();
    store.put(record("pg-scan-b", "1", json!({}))).await.unwrap();

    let scanned = store.scan(&TenantId::new("pg-scan-a").unwrap()).await.unwrap();
    let ids: Vec<&str> = scanned.iter().map(|r| r.record_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(store.ping().await.is_ok());
}
