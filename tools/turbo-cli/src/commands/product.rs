//! Single product lookup.

use anyhow::{Context as _, Result};
use turbo_commerce::ProductId;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id);
    let product = ctx
        .catalog_api()
        .get_item(id)
        .await
        .with_context(|| format!("Failed to load product {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Category", &product.category_name);
    ctx.output.kv("Price", &format_price(product.price));
    ctx.output.kv("Stock", &stock_badge(product.qty));
    if !product.description.is_empty() {
        ctx.output.kv("Description", &product.description);
    }
    if !product.image_url.is_empty() {
        ctx.output.kv("Image", &product.image_url);
    }

    Ok(())
}
