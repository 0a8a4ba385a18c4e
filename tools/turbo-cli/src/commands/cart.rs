//! Cart commands.

use anyhow::{bail, Result};
use serde::Serialize;
use turbo_commerce::prelude::*;
use turbo_storefront::ShoppingCartService;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{cart_badge, format_price};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
    user_id: UserId,
    items: &'a [CartItem],
    total: u32,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let session = ctx.auth_gate().resolve().await?;
    if !session.is_authenticated() {
        bail!("Sign in to view the cart (drop --anonymous)");
    }
    let user_id = session.user_id().unwrap_or(ctx.config.user_id);
    let service = ctx.cart_service();

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { product_id, qty } => {
            let request = CartItemToAdd::new(user_id, ProductId::new(product_id), qty)?;
            let item = service.add_item(&request).await?;
            ctx.output
                .success(&format!("Added product {} (item {})", item.product_id, item.id));
        }
        CartCommand::Update { item_id, qty } => {
            let update = CartItemQtyUpdate::new(CartItemId::new(item_id), qty)?;
            let item = service.update_quantity(&update).await?;
            ctx.output
                .success(&format!("Item {} now has quantity {}", item.id, item.qty));
        }
        CartCommand::Remove { item_id } => {
            let item = service.remove_item(CartItemId::new(item_id)).await?;
            ctx.output.success(&format!("Removed item {}", item.id));
        }
    }

    show(&service, user_id, ctx).await
}

/// Fetch the cart, broadcast its total and print both.
async fn show(service: &ShoppingCartService, user_id: UserId, ctx: &Context) -> Result<()> {
    let items = service.get_items(user_id).await?;
    let total = service.compute_total(&items);
    service.raise_changed(total);

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            user_id,
            items: &items,
            total,
        });
        return Ok(());
    }

    ctx.output.header(&cart_badge(service.current_total()));
    if items.is_empty() {
        ctx.output.info("The cart is empty.");
        return Ok(());
    }

    for item in &items {
        let name = if item.product_name.is_empty() {
            format!("product {}", item.product_id)
        } else {
            item.product_name.clone()
        };
        ctx.output.table_row(
            &[
                &item.id.to_string(),
                &name,
                &format!("x{}", item.qty),
                &format_price(item.total_price()),
            ],
            &[4, 32, 6, 10],
        );
    }

    Ok(())
}
