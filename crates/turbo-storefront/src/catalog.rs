//! Managed product cache.

use std::sync::Arc;

use turbo_cache::LocalCollection;
use turbo_commerce::prelude::*;
use turbo_data::CatalogApi;

use crate::error::StorefrontResult;

/// The local product snapshot, filled from the remote catalog on a miss.
#[derive(Clone)]
pub struct ProductCatalog {
    api: Arc<dyn CatalogApi>,
    cache: LocalCollection<Product>,
}

impl ProductCatalog {
    /// Create a catalog over the remote API and the product snapshot.
    pub fn new(api: Arc<dyn CatalogApi>, cache: LocalCollection<Product>) -> Self {
        Self { api, cache }
    }

    /// Evict the snapshot. Evicting an absent snapshot is not an error.
    pub async fn clear(&self) -> StorefrontResult<()> {
        self.cache.remove().await?;
        Ok(())
    }

    /// Return the cached snapshot, or fetch the catalog and cache it.
    ///
    /// `None` means the remote catalog has no products; nothing is cached
    /// in that case, so the next call asks again.
    pub async fn get_collection(&self) -> StorefrontResult<Option<Vec<Product>>> {
        if let Some(products) = self.cache.get().await? {
            tracing::debug!(count = products.len(), "product snapshot hit");
            return Ok(Some(products));
        }

        tracing::debug!("product snapshot miss, fetching catalog");
        let Some(products) = self.api.get_items().await? else {
            tracing::info!("remote catalog has no products");
            return Ok(None);
        };

        if let Err(e) = check_category_names(&products) {
            tracing::warn!(error = %e, "catalog has inconsistent category names");
        }

        self.cache.populate(&products).await?;
        Ok(Some(products))
    }

    /// Read the snapshot without contacting the remote catalog.
    pub async fn cached(&self) -> StorefrontResult<Option<Vec<Product>>> {
        Ok(self.cache.get().await?)
    }
}

impl std::fmt::Debug for ProductCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCatalog")
            .field("key", &self.cache.key())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use turbo_cache::{Cache, MemoryStore};
    use turbo_data::MemoryCatalog;

    fn products() -> Vec<Product> {
        vec![
            Product::new(1, "Lamp", Decimal::new(1999, 2), 2, "Home"),
            Product::new(2, "Mug", Decimal::new(599, 2), 2, "Home"),
        ]
    }

    fn catalog(api: Arc<MemoryCatalog>) -> ProductCatalog {
        let cache = Cache::new(Arc::new(MemoryStore::new()));
        ProductCatalog::new(api, LocalCollection::new(cache, "ProductCollection"))
    }

    #[tokio::test]
    async fn test_miss_fetches_and_populates() {
        let api = Arc::new(MemoryCatalog::new(products()));
        let catalog = catalog(Arc::clone(&api));

        assert_eq!(catalog.get_collection().await.unwrap(), Some(products()));
        assert_eq!(catalog.cached().await.unwrap(), Some(products()));

        catalog.get_collection().await.unwrap();
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let api = Arc::new(MemoryCatalog::new(products()));
        let catalog = catalog(Arc::clone(&api));

        catalog.get_collection().await.unwrap();
        catalog.clear().await.unwrap();
        catalog.clear().await.unwrap();
        assert_eq!(catalog.cached().await.unwrap(), None);

        catalog.get_collection().await.unwrap();
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_not_found_caches_nothing() {
        let catalog = catalog(Arc::new(MemoryCatalog::empty()));

        assert_eq!(catalog.get_collection().await.unwrap(), None);
        assert_eq!(catalog.cached().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let api = Arc::new(MemoryCatalog::new(products()));
        api.fail_with("Error retrieving data from database").await;
        let catalog = catalog(api);

        let err = catalog.get_collection().await.unwrap_err();
        assert!(err.to_string().contains("Error retrieving data from database"));
    }
}
