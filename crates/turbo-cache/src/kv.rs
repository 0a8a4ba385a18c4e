//! Key-Value store contract and typed wrapper with automatic serialization.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

/// Persistent key-value storage.
///
/// Values are opaque bytes; [`Cache`] layers JSON serialization on top.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get the raw value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning shares the underlying store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl Cache {
    /// Wrap a store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let products: Option<Vec<Product>> = cache.get("ProductCollection").await?;
    /// ```
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes).await
    }

    /// Remove a value from the cache.
    pub async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key).await
    }

    /// Check if a key exists in the cache.
    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key).await
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Badge {
        count: u32,
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        cache.set("badge", &Badge { count: 3 }).await.unwrap();
        let badge: Option<Badge> = cache.get("badge").await.unwrap();

        assert_eq!(badge, Some(Badge { count: 3 }));
        assert!(cache.exists("badge").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_key() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));
        let badge: Option<Badge> = cache.get("nothing").await.unwrap();
        assert!(badge.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_value_is_error() {
        let store = Arc::new(MemoryStore::new());
        store.set("badge", b"not json").await.unwrap();

        let cache = Cache::new(store);
        let result = cache.get::<Badge>("badge").await;
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }
}
