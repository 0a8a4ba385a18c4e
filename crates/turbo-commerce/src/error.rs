//! Commerce error types.

use crate::ids::CategoryId;
use thiserror::Error;

/// Errors raised by catalog and cart domain logic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Two products in the same category disagree on its name.
    #[error("Category {category_id} has conflicting names: {first:?} and {second:?}")]
    CategoryNameMismatch {
        category_id: CategoryId,
        first: String,
        second: String,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    /// More than one cart item for the same user and product.
    #[error("Duplicate cart item for product {0}")]
    DuplicateCartItem(String),
}
