//! Remote data access for TurboCommerce.
//!
//! Defines the catalog and cart contracts the storefront consumes, an
//! HTTP client that implements them against the backend, and in-memory
//! implementations for offline use and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_data::{CatalogApi, FetchClient};
//!
//! let client = FetchClient::builder("https://localhost:7252")
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//!
//! match client.get_items().await? {
//!     Some(products) => println!("{} products", products.len()),
//!     None => println!("catalog is empty"),
//! }
//! ```

pub mod api;
mod client;
mod error;
mod memory;

pub use api::{CartApi, CatalogApi};
pub use client::{FetchClient, FetchClientBuilder, DEFAULT_TIMEOUT};
pub use error::FetchError;
pub use memory::{CatalogFixture, MemoryCart, MemoryCatalog};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartApi, CatalogApi, FetchClient, FetchError, MemoryCart, MemoryCatalog};
}
