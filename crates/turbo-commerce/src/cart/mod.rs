//! Shopping cart module.
//!
//! Contains cart items, the requests that mutate them, and the total
//! quantity shown on the cart badge.

mod item;
mod total;

pub use item::{
    check_unique_items, validate_quantity, CartItem, CartItemQtyUpdate, CartItemToAdd,
    MAX_QUANTITY_PER_ITEM,
};
pub use total::compute_total;
