//! Named collection snapshots.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::{Cache, CacheError};

/// A named snapshot of a sequence of `T` held in a [`Cache`].
///
/// The snapshot is only ever replaced wholesale: `populate` overwrites it,
/// `remove` evicts it, `get` reads it. There is no per-item mutation.
///
/// # Example
///
/// ```rust,ignore
/// let products: LocalCollection<Product> = LocalCollection::new(cache, "ProductCollection");
///
/// products.remove().await?;
/// if products.get().await?.is_none() {
///     products.populate(&fetched).await?;
/// }
/// ```
pub struct LocalCollection<T> {
    cache: Cache,
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> LocalCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a collection stored under `key`.
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// The store key of this collection.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Evict the snapshot. Succeeds whether or not one exists.
    pub async fn remove(&self) -> Result<(), CacheError> {
        tracing::debug!(key = %self.key, "evicting collection");
        self.cache.remove(&self.key).await
    }

    /// Read the current snapshot, or `None` if there isn't one.
    pub async fn get(&self) -> Result<Option<Vec<T>>, CacheError> {
        let snapshot = self.cache.get::<Vec<T>>(&self.key).await?;
        match &snapshot {
            Some(items) => tracing::debug!(key = %self.key, len = items.len(), "collection hit"),
            None => tracing::debug!(key = %self.key, "collection miss"),
        }
        Ok(snapshot)
    }

    /// Replace the snapshot with `items`.
    pub async fn populate(&self, items: &[T]) -> Result<(), CacheError> {
        tracing::debug!(key = %self.key, len = items.len(), "populating collection");
        self.cache.set(&self.key, items).await
    }
}

impl<T> Clone for LocalCollection<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for LocalCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCollection")
            .field("key", &self.key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::sync::Arc;

    fn collection() -> LocalCollection<u32> {
        LocalCollection::new(Cache::new(Arc::new(MemoryStore::new())), "numbers")
    }

    #[tokio::test]
    async fn test_absent_before_populate() {
        assert!(collection().get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_populate_replaces_wholesale() {
        let numbers = collection();
        numbers.populate(&[1, 2, 3]).await.unwrap();
        numbers.populate(&[9]).await.unwrap();

        assert_eq!(numbers.get().await.unwrap(), Some(vec![9]));
    }

    #[tokio::test]
    async fn test_empty_snapshot_is_not_absent() {
        let numbers = collection();
        numbers.populate(&[]).await.unwrap();
        assert_eq!(numbers.get().await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_remove_twice_is_noop() {
        let numbers = collection();
        numbers.populate(&[1]).await.unwrap();

        numbers.remove().await.unwrap();
        numbers.remove().await.unwrap();
        assert!(numbers.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collections_share_store_by_key() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));
        let a: LocalCollection<u32> = LocalCollection::new(cache.clone(), "a");
        let b: LocalCollection<u32> = LocalCollection::new(cache, "b");

        a.populate(&[1]).await.unwrap();
        b.remove().await.unwrap();

        assert_eq!(a.get().await.unwrap(), Some(vec![1]));
        assert_eq!(a.key(), "a");
    }
}
