//! Storefront client state for TurboCommerce.
//!
//! Ties the collaborator crates together into what the catalog page
//! needs:
//!
//! - **Cart state**: the cart total, its subscribers, cart mutations
//! - **Product catalog**: the local product snapshot, filled on a miss
//! - **Products page**: the activation protocol and category grouping
//! - **Config**: file discovery, TOML/JSON loading, env overrides
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_storefront::prelude::*;
//!
//! let page = ProductsPage::new(catalog, cart, gate, config.user_id);
//! page.cart().subscribe(|total| println!("cart: {}", total));
//!
//! match page.activate().await {
//!     ActivationOutcome::Failed(message) => eprintln!("{}", message),
//!     _ => {
//!         for group in page.grouped_products() {
//!             println!("{}", page.category_name(&group).unwrap_or_default());
//!         }
//!     }
//! }
//! ```

pub mod cart_state;
pub mod catalog;
pub mod config;
pub mod error;
pub mod page;

pub use cart_state::{CartChangedHandler, ShoppingCartService, SubscriptionId};
pub use catalog::ProductCatalog;
pub use config::{
    ApiConfig, AuthConfig, CacheConfig, LogFormat, LoggingConfig, StorefrontConfig,
};
pub use error::{StorefrontError, StorefrontResult};
pub use page::{ActivationOutcome, ProductsPage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ActivationOutcome, ProductCatalog, ProductsPage, ShoppingCartService, StorefrontConfig,
        StorefrontError, SubscriptionId,
    };
}
