//! String-keyed persistence backends.
//!
//! The application persists everything as JSON strings under namespaced
//! keys, mirroring a browser-storage style interface: `get`, `set`,
//! `remove`. Backends report quota exhaustion distinctly so callers can
//! shed data instead of failing a save.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected a write because it is out of space.
    #[error("storage quota exceeded for key: {key}")]
    QuotaExceeded { key: String },

    /// Any other backend failure (connection, I/O, etc.)
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A string-keyed get/set/remove store.
///
/// Values are opaque strings; callers own serialization. Writes replace the
/// whole value atomically.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Set the value for a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key).await
    }
}

/// In-memory store for tests and ephemeral embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();

        assert!(store.get("k").await.unwrap().is_none());

        store.set("k", "v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.remove("missing").await.unwrap();
        assert!(store.is_empty().await);
    }
}
