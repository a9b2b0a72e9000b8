//! # Postgres Record Store
//!
//! Persists records in a single `records` table keyed by
//! `(tenant_id, record_id)`, attributes as JSONB.
//!
//! Every [`RecordStore`] method is exactly one SQL statement, so single-key
//! atomicity comes from Postgres itself:
//!
//! | Method   | Statement |
//! |----------|-----------|
//! | `scan`   | `SELECT ... WHERE tenant_id = $1 ORDER BY record_id` |
//! | `get`    | `SELECT ... WHERE tenant_id = $1 AND record_id = $2` |
//! | `put`    | `INSERT ... ON CONFLICT DO UPDATE` |
//! | `insert` | `INSERT ... ON CONFLICT DO NOTHING` |
//! | `merge`  | `UPDATE ... SET attributes = attributes \|\| $3` |
//! | `delete` | `DELETE ... WHERE tenant_id = $1 AND record_id = $2` |

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use tkv_core::{Attributes, FieldUpdates, Record, RecordId, RecordKey, TenantId};

use crate::error::StoreError;
use crate::RecordStore;

/// Connection settings for [`PgRecordStore`].
///
/// Custom `Debug` redacts the URL, which may carry credentials.
#[derive(Clone)]
pub struct PgConfig {
    /// Postgres connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long to wait for a pooled connection before failing.
    pub acquire_timeout: Duration,
}

impl std::fmt::Debug for PgConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl PgConfig {
    /// Settings for `url` with default pool sizing.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    /// Read `DATABASE_URL` (and optional `TKV_DB_MAX_CONNECTIONS`).
    ///
    /// Returns `None` when `DATABASE_URL` is unset: the caller runs on the
    /// in-memory store.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let mut config = Self::new(url);
        if let Some(max) = std::env::var("TKV_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_connections = max;
        }
        Some(config)
    }
}

/// [`RecordStore`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Connect, then apply embedded migrations.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] if the connection fails,
    /// [`StoreError::Migration`] if the schema cannot be applied.
    pub async fn connect(config: &PgConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;
        tracing::info!("Connected to PostgreSQL");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct RecordRow {
    tenant_id: String,
    record_id: String,
    attributes: Json<Attributes>,
}

impl RecordRow {
    fn into_record(self) -> Result<Record, StoreError> {
        let tenant_id = TenantId::new(self.tenant_id)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let record_id = RecordId::new(self.record_id)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        Ok(Record::new(
            RecordKey::new(tenant_id, record_id),
            self.attributes.0,
        ))
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn scan(&self, tenant: &TenantId) -> Result<Vec<Record>, StoreError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            "SELECT tenant_id, record_id, attributes
             FROM records WHERE tenant_id = $1 ORDER BY record_id",
        )
        .bind(tenant.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RecordRow::into_record).collect()
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Record>, StoreError> {
        let row = sqlx::query_as::<_, RecordRow>(
            "SELECT tenant_id, record_id, attributes
             FROM records WHERE tenant_id = $1 AND record_id = $2",
        )
        .bind(key.tenant_id.as_str())
        .bind(key.record_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RecordRow::into_record).transpose()
    }

    async fn put(&self, record: Record) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO records (tenant_id, record_id, attributes)
             VALUES ($1, $2, $3)
             ON CONFLICT (tenant_id, record_id)
             DO UPDATE SET attributes = EXCLUDED.attributes, updated_at = NOW()",
        )
        .bind(record.tenant_id.as_str())
        .bind(record.record_id.as_str())
        .bind(Json(&record.attributes))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert(&self, record: Record) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO records (tenant_id, record_id, attributes)
             VALUES ($1, $2, $3)
             ON CONFLICT (tenant_id, record_id) DO NOTHING",
        )
        .bind(record.tenant_id.as_str())
        .bind(record.record_id.as_str())
        .bind(Json(&record.attributes))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists(record.key()));
        }
        Ok(())
    }

    async fn merge(
        &self,
        key: &RecordKey,
        updates: &FieldUpdates,
    ) -> Result<Attributes, StoreError> {
        let result = sqlx::query(
            "UPDATE records SET attributes = attributes || $3, updated_at = NOW()
             WHERE tenant_id = $1 AND record_id = $2",
        )
        .bind(key.tenant_id.as_str())
        .bind(key.record_id.as_str())
        .bind(Json(updates.as_map()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(key.clone()));
        }
        Ok(updates.as_map().clone())
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM records WHERE tenant_id = $1 AND record_id = $2")
            .bind(key.tenant_id.as_str())
            .bind(key.record_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pg_config_debug_redacts_url() {
        let config = PgConfig::new("postgres://admin:hunter2@db:5432/tkv");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn pg_config_defaults() {
        let config = PgConfig::new("postgres://db/tkv");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn row_converts_to_record() {
        let row = RecordRow {
            tenant_id: "PLAZA VEA".into(),
            record_id: "PVP01".into(),
            attributes: Json(json!({"nombre": "Leche"}).as_object().cloned().unwrap()),
        };
        let record = row.into_record().unwrap();
        assert_eq!(record.key().to_string(), "PLAZA VEA/PVP01");
        assert_eq!(record.attributes["nombre"], json!("Leche"));
    }

    #[test]
    fn row_with_blank_key_is_corrupt() {
        let row = RecordRow {
            tenant_id: " ".into(),
            record_id: "PVP01".into(),
            attributes: Json(Attributes::new()),
        };
        assert!(matches!(row.into_record(), Err(StoreError::Corrupt(_))));
    }
}
