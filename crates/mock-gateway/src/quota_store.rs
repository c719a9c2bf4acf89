//! Quota-limited store - rejects oversized writes.

use async_trait::async_trait;

use recipe_core::{KeyValueStore, MemoryStore, StoreError};

/// An in-memory store that rejects values above a byte cap with
/// [`StoreError::QuotaExceeded`].
///
/// Mirrors a browser-storage quota so tests can exercise the
/// shrink-and-retry persistence path.
#[derive(Debug)]
pub struct QuotaStore {
    inner: MemoryStore,
    max_value_bytes: usize,
}

impl QuotaStore {
    /// Create a store that rejects values larger than `max_value_bytes`.
    pub fn new(max_value_bytes: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            max_value_bytes,
        }
    }
}

#[async_trait]
impl KeyValueStore for QuotaStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.len() > self.max_value_bytes {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key).await
    }
}
