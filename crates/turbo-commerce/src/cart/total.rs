//! Cart total quantity.

use crate::cart::CartItem;

/// Sum the quantities of a cart's items.
///
/// Non-positive quantities count as zero and the sum saturates at
/// `u32::MAX`, so the total is never negative whatever the server sends.
pub fn compute_total<'a, I>(items: I) -> u32
where
    I: IntoIterator<Item = &'a CartItem>,
{
    items.into_iter().fold(0u32, |total, item| {
        total.saturating_add(item.qty.max(0).unsigned_abs())
    })
}
