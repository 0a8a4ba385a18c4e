//! Product types.

use crate::ids::{CategoryId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the catalog, as served by the catalog API.
///
/// Category name is denormalized onto the product so listings can render
/// without a join. Products sharing a `category_id` must share a
/// `category_name`; see [`crate::catalog::check_category_names`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Product description.
    #[serde(default)]
    pub description: String,
    /// Image reference (relative URL).
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    /// Unit price.
    pub price: Decimal,
    /// Quantity available.
    #[serde(default)]
    pub qty: i32,
    /// Owning category.
    pub category_id: CategoryId,
    /// Owning category's name.
    #[serde(default)]
    pub category_name: String,
}

impl Product {
    /// Create a product with the required fields; the rest start empty.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        category_id: impl Into<CategoryId>,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image_url: String::new(),
            price,
            qty: 0,
            category_id: category_id.into(),
            category_name: category_name.into(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the available quantity.
    pub fn with_qty(mut self, qty: i32) -> Self {
        self.qty = qty;
        self
    }

    /// Check if any stock is available.
    pub fn is_in_stock(&self) -> bool {
        self.qty > 0
    }
}
