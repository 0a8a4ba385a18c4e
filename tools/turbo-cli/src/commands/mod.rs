//! CLI command implementations.

pub mod cache;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod product;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show this category.
    #[arg(long)]
    pub category: Option<i32>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: i32,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List cart items and the total.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        product_id: i32,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        qty: i32,
    },
    /// Change the quantity of a cart item.
    Update {
        /// Cart item ID.
        item_id: i32,
        /// New quantity.
        qty: i32,
    },
    /// Remove a cart item.
    Remove {
        /// Cart item ID.
        item_id: i32,
    },
}

/// Arguments for the cache command.
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Evict the local snapshots.
    Clear {
        /// Only evict the product snapshot.
        #[arg(long, conflicts_with = "cart")]
        products: bool,
        /// Only evict the cart snapshot.
        #[arg(long)]
        cart: bool,
    },
}
