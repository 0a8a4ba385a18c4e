//! Catalog listing.

use std::sync::Arc;

use anyhow::{bail, Result};
use parking_lot::Mutex;
use serde::Serialize;
use turbo_commerce::prelude::{CategoryGroup, Product};
use turbo_storefront::ActivationOutcome;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{cart_badge, format_price, stock_badge};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupView<'a> {
    category_id: i32,
    category_name: Option<&'a str>,
    products: &'a [Product],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogView<'a> {
    groups: Vec<GroupView<'a>>,
    cart_total: Option<u32>,
}

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let page = ctx.products_page();

    let badge = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&badge);
    page.cart().subscribe(move |total| *sink.lock() = Some(total));

    match page.activate().await {
        ActivationOutcome::Failed(message) => bail!(message),
        ActivationOutcome::Superseded => bail!("activation was superseded"),
        ActivationOutcome::Completed { authorized, .. } => {
            ctx.output.debug(&format!("activation finished, signed in: {}", authorized));
        }
    }

    let groups: Vec<CategoryGroup> = page
        .grouped_products()
        .into_iter()
        .filter(|g| args.category.map_or(true, |id| g.category_id.get() == id))
        .collect();
    let cart_total = *badge.lock();

    if ctx.output.is_json() {
        let view = CatalogView {
            groups: groups
                .iter()
                .map(|g| GroupView {
                    category_id: g.category_id.get(),
                    category_name: page.category_name(g),
                    products: &g.products,
                })
                .collect(),
            cart_total,
        };
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.kv("Badge", &cart_badge(cart_total));

    if groups.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    for group in &groups {
        let name = page.category_name(group).unwrap_or("Uncategorized");
        ctx.output.header(name);
        for product in &group.products {
            ctx.output.table_row(
                &[
                    &product.id.to_string(),
                    &product.name,
                    &format_price(product.price),
                    &stock_badge(product.qty),
                ],
                &[4, 32, 10, 12],
            );
        }
    }

    Ok(())
}
