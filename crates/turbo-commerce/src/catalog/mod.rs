//! Product catalog module.
//!
//! Contains products, categories, and the category grouping used by
//! catalog listings.

mod category;
mod grouping;
mod product;

pub use category::ProductCategory;
pub use grouping::{check_category_names, group_by_category, CategoryGroup};
pub use product::Product;
