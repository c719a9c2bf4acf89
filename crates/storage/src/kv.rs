//! SQLite-backed implementation of the `KeyValueStore` trait.

use async_trait::async_trait;
use recipe_core::{KeyValueStore, StoreError};
use sqlx::SqlitePool;
use tracing::debug;

/// Default maximum size of a single stored value, in bytes.
///
/// Writes above the cap report [`StoreError::QuotaExceeded`], so the caller
/// can shed data the same way it would for a full backend.
const DEFAULT_MAX_VALUE_BYTES: usize = 512 * 1024;

/// Durable string-keyed store over a single `kv` table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    max_value_bytes: usize,
}

impl SqliteStore {
    /// Create a store with the default value-size cap.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_max_value_bytes(pool, DEFAULT_MAX_VALUE_BYTES)
    }

    /// Create a store with a custom value-size cap.
    pub fn with_max_value_bytes(pool: SqlitePool, max_value_bytes: usize) -> Self {
        Self {
            pool,
            max_value_bytes,
        }
    }
}

/// Map a write-side SQLx error, surfacing disk-full as quota exhaustion.
fn map_write_error(err: sqlx::Error, key: &str) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        let message = db_err.message().to_lowercase();
        if message.contains("full") || message.contains("too big") {
            return StoreError::QuotaExceeded {
                key: key.to_string(),
            };
        }
    }
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>(
            r#"
            SELECT value FROM kv WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.len() > self.max_value_bytes {
            debug!(
                "Rejecting oversized write for {}: {} bytes (cap {})",
                key,
                value.len(),
                self.max_value_bytes
            );
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO kv (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, key))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            DELETE FROM kv WHERE key = ?
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}
