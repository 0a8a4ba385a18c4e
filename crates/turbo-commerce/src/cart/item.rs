//! Cart item types.

use std::collections::HashSet;

use crate::error::CommerceError;
use crate::ids::{CartItemId, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart item.
pub const MAX_QUANTITY_PER_ITEM: i32 = 9999;

/// One product line in a user's cart.
///
/// At most one item exists per (user, product) pair; adding the same
/// product again grows the quantity of the existing item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart item identifier.
    pub id: CartItemId,
    /// Product in the cart.
    pub product_id: ProductId,
    /// Owning user.
    pub user_id: UserId,
    /// Quantity. Kept signed to mirror the wire format; see
    /// [`crate::cart::compute_total`] for how non-positive values count.
    pub qty: i32,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub product_name: String,
    /// Unit price at the time the item was added.
    #[serde(default)]
    pub price: Decimal,
}

impl CartItem {
    /// Create a new cart item.
    pub fn new(
        id: impl Into<CartItemId>,
        product_id: impl Into<ProductId>,
        user_id: impl Into<UserId>,
        qty: i32,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            user_id: user_id.into(),
            qty,
            product_name: String::new(),
            price: Decimal::ZERO,
        }
    }

    /// Set display fields copied from the product.
    pub fn with_product(mut self, name: impl Into<String>, price: Decimal) -> Self {
        self.product_name = name.into();
        self.price = price;
        self
    }

    /// Line total (unit price times quantity; zero for non-positive quantities).
    pub fn total_price(&self) -> Decimal {
        self.price * Decimal::from(self.qty.max(0))
    }
}

/// Request to add a product to a user's cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemToAdd {
    /// Owning user.
    pub user_id: UserId,
    /// Product to add.
    pub product_id: ProductId,
    /// Quantity to add.
    pub qty: i32,
}

impl CartItemToAdd {
    /// Create a validated add request.
    pub fn new(user_id: UserId, product_id: ProductId, qty: i32) -> Result<Self, CommerceError> {
        validate_quantity(qty)?;
        Ok(Self {
            user_id,
            product_id,
            qty,
        })
    }
}

/// Request to change the quantity of an existing cart item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemQtyUpdate {
    /// Item to update.
    pub cart_item_id: CartItemId,
    /// New quantity.
    pub qty: i32,
}

impl CartItemQtyUpdate {
    /// Create a validated quantity update.
    pub fn new(cart_item_id: CartItemId, qty: i32) -> Result<Self, CommerceError> {
        validate_quantity(qty)?;
        Ok(Self { cart_item_id, qty })
    }
}

/// Check that a quantity is positive and within the per-item limit.
pub fn validate_quantity(qty: i32) -> Result<(), CommerceError> {
    if qty <= 0 || qty > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::InvalidQuantity(qty));
    }
    Ok(())
}

/// Verify that no (user, product) pair appears twice.
pub fn check_unique_items(items: &[CartItem]) -> Result<(), CommerceError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert((item.user_id, item.product_id)) {
            return Err(CommerceError::DuplicateCartItem(format!(
                "user {} product {}",
                item.user_id, item.product_id
            )));
        }
    }
    Ok(())
}
