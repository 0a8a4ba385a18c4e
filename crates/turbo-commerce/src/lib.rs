//! Storefront domain types for TurboCommerce.
//!
//! This crate provides the types shared by the catalog client and the
//! cart state layer:
//!
//! - **Catalog**: products, categories, grouping by category for listings
//! - **Cart**: cart items, add/update requests, total quantity
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_commerce::prelude::*;
//!
//! let groups = group_by_category(&products);
//! for group in &groups {
//!     println!("{}", group.category_name().unwrap_or_default());
//! }
//!
//! let badge = compute_total(&cart_items);
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod cart;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        check_category_names, group_by_category, CategoryGroup, Product, ProductCategory,
    };

    // Cart
    pub use crate::cart::{compute_total, CartItem, CartItemQtyUpdate, CartItemToAdd};
}
