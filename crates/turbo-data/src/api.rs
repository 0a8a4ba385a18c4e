//! Remote catalog and cart contracts.

use async_trait::async_trait;
use turbo_commerce::prelude::*;

use crate::FetchError;

/// Read access to the remote product catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All products. `Ok(None)` when the backend has none to return.
    async fn get_items(&self) -> Result<Option<Vec<Product>>, FetchError>;

    /// One product. A missing id fails with [`FetchError::BadRequest`].
    async fn get_item(&self, id: ProductId) -> Result<Product, FetchError>;

    /// All product categories.
    async fn get_categories(&self) -> Result<Vec<ProductCategory>, FetchError>;

    /// Products in one category.
    async fn get_items_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, FetchError>;
}

/// Access to the remote shopping cart.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Items in a user's cart. An unknown user has an empty cart.
    async fn get_items(&self, user_id: UserId) -> Result<Vec<CartItem>, FetchError>;

    /// Add a product, or grow the quantity of the item already holding it.
    async fn add_item(&self, item: &CartItemToAdd) -> Result<CartItem, FetchError>;

    /// Set the quantity of an item.
    async fn update_qty(&self, update: &CartItemQtyUpdate) -> Result<CartItem, FetchError>;

    /// Remove an item, returning it.
    async fn delete_item(&self, id: CartItemId) -> Result<CartItem, FetchError>;
}

/// Relative paths of the backend endpoints.
pub mod routes {
    use turbo_commerce::ids::{CartItemId, CategoryId, ProductId, UserId};

    pub const PRODUCTS: &str = "api/product";
    pub const CATEGORIES: &str = "api/product/GetProductCategories";
    pub const CART: &str = "api/shoppingcart";

    pub fn product(id: ProductId) -> String {
        format!("{}/{}", PRODUCTS, id)
    }

    pub fn products_by_category(category_id: CategoryId) -> String {
        format!("{}/{}/GetItemsByCategory", PRODUCTS, category_id)
    }

    pub fn cart_items(user_id: UserId) -> String {
        format!("{}/{}/GetItems", CART, user_id)
    }

    pub fn cart_item(id: CartItemId) -> String {
        format!("{}/{}", CART, id)
    }
}
