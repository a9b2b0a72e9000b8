//! # In-Memory Record Store
//!
//! Thread-safe, cloneable store partitioned by tenant.
//!
//! All operations are synchronous under the hood (the lock is
//! `parking_lot`, not `tokio::sync`) because the lock is never held across
//! an `.await`. `parking_lot::RwLock` is non-poisonable, so a panicking
//! writer does not permanently corrupt the store.
//!
//! Partitions are `BTreeMap`s keyed by record id, so a scan returns records
//! in ascending `record_id` order.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tkv_core::{Attributes, FieldUpdates, Record, RecordId, RecordKey, TenantId};

use crate::error::StoreError;
use crate::RecordStore;

type Partitions = BTreeMap<TenantId, BTreeMap<RecordId, Attributes>>;

/// Process-local [`RecordStore`].
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    partitions: Arc<RwLock<Partitions>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all tenants.
    pub fn len(&self) -> usize {
        self.partitions.read().values().map(BTreeMap::len).sum()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tenants with at least one record.
    pub fn tenant_count(&self) -> usize {
        self.partitions.read().len()
    }

    fn assemble(tenant: &TenantId, record_id: &RecordId, attributes: &Attributes) -> Record {
        Record {
            tenant_id: tenant.clone(),
            record_id: record_id.clone(),
            attributes: attributes.clone(),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn scan(&self, tenant: &TenantId) -> Result<Vec<Record>, StoreError> {
        let guard = self.partitions.read();
        Ok(guard
            .get(tenant)
            .map(|partition| {
                partition
                    .iter()
                    .map(|(record_id, attributes)| Self::assemble(tenant, record_id, attributes))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, StoreError> {
        let guard = self.partitions.read();
        Ok(guard
            .get(&key.tenant_id)
            .and_then(|partition| partition.get(&key.record_id))
            .map(|attributes| Self::assemble(&key.tenant_id, &key.record_id, attributes)))
    }

    async fn put(&self, record: Record) -> Result<(), StoreError> {
        self.partitions
            .write()
            .entry(record.tenant_id)
            .or_default()
            .insert(record.record_id, record.attributes);
        Ok(())
    }

    async fn insert(&self, record: Record) -> Result<(), StoreError> {
        let mut guard = self.partitions.write();
        let partition = guard.entry(record.tenant_id.clone()).or_default();
        if partition.contains_key(&record.record_id) {
            return Err(StoreError::AlreadyExists(RecordKey::new(
                record.tenant_id,
                record.record_id,
            )));
        }
        partition.insert(record.record_id, record.attributes);
        Ok(())
    }

    async fn merge(
        &self,
        key: &RecordKey,
        updates: &FieldUpdates,
    ) -> Result<Attributes, StoreError> {
        let mut guard = self.partitions.write();
        let attributes = guard
            .get_mut(&key.tenant_id)
            .and_then(|partition| partition.get_mut(&key.record_id))
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        Ok(updates.apply_to(attributes))
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        let mut guard = self.partitions.write();
        if let Some(partition) = guard.get_mut(&key.tenant_id) {
            partition.remove(&key.record_id);
            if partition.is_empty() {
                guard.remove(&key.tenant_id);
            }
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        // Process-local: always reachable.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(tenant: &str, record: &str) -> RecordKey {
        RecordKey::new(TenantId::new(tenant).unwrap(), RecordId::new(record).unwrap())
    }

    fn record(tenant: &str, id: &str, attrs: serde_json::Value) -> Record {
        Record::new(key(tenant, id), attrs.as_object().cloned().unwrap())
    }

    fn updates(value: serde_json::Value) -> FieldUpdates {
        FieldUpdates::new(value.as_object().cloned().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = MemoryRecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.tenant_count(), 0);
        let tenant = TenantId::new("A").unwrap();
        assert!(store.scan(&tenant).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_and_get_roundtrip() {
        let store = MemoryRecordStore::new();
        let r = record("PLAZA VEA", "PVP01", json!({"nombre": "Leche"}));
        store.put(r.clone()).await.unwrap();

        let fetched = store.get(&key("PLAZA VEA", "PVP01")).await.unwrap();
        assert_eq!(fetched, Some(r));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = MemoryRecordStore::new();
        assert!(store.get(&key("A", "1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing() {
        let store = MemoryRecordStore::new();
        store.put(record("A", "1", json!({"nombre": "x", "old": true}))).await.unwrap();
        store.put(record("A", "1", json!({"nombre": "y"}))).await.unwrap();

        let fetched = store.get(&key("A", "1")).await.unwrap().unwrap();
        assert_eq!(fetched.attributes["nombre"], json!("y"));
        assert!(!fetched.attributes.contains_key("old"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn insert_rejects_occupied_key() {
        let store = MemoryRecordStore::new();
        store.insert(record("A", "1", json!({"nombre": "x"}))).await.unwrap();
        let err = store
            .insert(record("A", "1", json!({"nombre": "y"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));

        let fetched = store.get(&key("A", "1")).await.unwrap().unwrap();
        assert_eq!(fetched.attributes["nombre"], json!("x"));
    }

    #[tokio::test]
    async fn insert_same_record_id_in_other_tenant_is_allowed() {
        let store = MemoryRecordStore::new();
        store.insert(record("A", "1", json!({}))).await.unwrap();
        store.insert(record("B", "1", json!({}))).await.unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.tenant_count(), 2);
    }

    #[tokio::test]
    async fn scan_is_tenant_scoped_and_ordered() {
        let store = MemoryRecordStore::new();
        store.put(record("A", "2", json!({}))).await.unwrap();
        store.put(record("A", "1", json!({}))).await.unwrap();
        store.put(record("B", "1", json!({}))).await.unwrap();

        let a = store.scan(&TenantId::new("A").unwrap()).await.unwrap();
        let ids: Vec<&str> = a.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(a.iter().all(|r| r.tenant_id.as_str() == "A"));
    }

    #[tokio::test]
    async fn merge_overwrites_only_named_fields() {
        let store = MemoryRecordStore::new();
        store
            .put(record("A", "1", json!({"nombre": "Leche", "marca": "Gloria"})))
            .await
            .unwrap();

        let changed = store
            .merge(&key("A", "1"), &updates(json!({"nombre": "Leche Nueva"})))
            .await
            .unwrap();
        assert_eq!(serde_json::Value::Object(changed), json!({"nombre": "Leche Nueva"}));

        let fetched = store.get(&key("A", "1")).await.unwrap().unwrap();
        assert_eq!(fetched.attributes["nombre"], json!("Leche Nueva"));
        assert_eq!(fetched.attributes["marca"], json!("Gloria"));
    }

    #[tokio::test]
    async fn merge_missing_key_is_not_found_and_creates_nothing() {
        let store = MemoryRecordStore::new();
        let err = store
            .merge(&key("A", "1"), &updates(json!({"nombre": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryRecordStore::new();
        store.put(record("A", "1", json!({}))).await.unwrap();

        store.delete(&key("A", "1")).await.unwrap();
        store.delete(&key("A", "1")).await.unwrap();
        store.delete(&key("NOBODY", "1")).await.unwrap();

        assert!(store.get(&key("A", "1")).await.unwrap().is_none());
        assert!(store.is_empty());
        assert_eq!(store.tenant_count(), 0);
    }

    #[tokio::test]
    async fn delete_leaves_other_tenant_untouched() {
        let store = MemoryRecordStore::new();
        store.put(record("A", "1", json!({}))).await.unwrap();
        store.put(record("B", "1", json!({}))).await.unwrap();

        store.delete(&key("A", "1")).await.unwrap();
        assert!(store.get(&key("B", "1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn clone_shares_underlying_data() {
        let store = MemoryRecordStore::new();
        let clone = store.clone();
        clone.put(record("A", "1", json!({}))).await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn ping_succeeds() {
        assert!(MemoryRecordStore::new().ping().await.is_ok());
    }

    #[tokio::test]
    async fn ping_succeeds_while_a_writer_holds_the_lock() {
        let store = MemoryRecordStore::new();
        let _writer = store.partitions.write();
        assert!(store.ping().await.is_ok());
    }
}
