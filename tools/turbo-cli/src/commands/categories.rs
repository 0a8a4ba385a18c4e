//! Category listing.

use anyhow::{Context as _, Result};

use crate::context::Context;

/// Run the categories command.
pub async fn run(ctx: &Context) -> Result<()> {
    let categories = ctx
        .catalog_api()
        .get_categories()
        .await
        .context("Failed to load categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    if categories.is_empty() {
        ctx.output.info("No categories found.");
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output.table_row(
            &[
                &category.id.to_string(),
                &category.name,
                category.icon_css.as_deref().unwrap_or(""),
            ],
            &[4, 24, 24],
        );
    }

    Ok(())
}
