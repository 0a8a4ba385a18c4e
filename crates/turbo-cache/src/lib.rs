//! Type-safe Key-Value caching layer for TurboCommerce.
//!
//! Provides a simple, ergonomic API for caching data in a key-value store
//! with automatic JSON serialization, and named collection snapshots that
//! are replaced wholesale.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use turbo_cache::{Cache, LocalCollection, MemoryStore};
//!
//! let cache = Cache::new(Arc::new(MemoryStore::new()));
//!
//! // Store a value
//! cache.set("cart:1", &items).await?;
//!
//! // Retrieve a value
//! let items: Option<Vec<CartItem>> = cache.get("cart:1").await?;
//!
//! // Whole-collection snapshots
//! let products: LocalCollection<Product> = LocalCollection::new(cache, "ProductCollection");
//! products.populate(&fetched).await?;
//! ```

mod collection;
mod error;
mod file;
mod kv;
mod memory;

pub use collection::LocalCollection;
pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, LocalCollection, MemoryStore};
}
