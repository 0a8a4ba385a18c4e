//! Local cache commands.

use anyhow::Result;

use super::{CacheArgs, CacheCommand};
use crate::context::Context;

/// Run the cache command.
pub async fn run(args: CacheArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CacheCommand::Clear { products, cart } => {
            let all = !products && !cart;
            if all || products {
                ctx.product_catalog().clear().await?;
                ctx.output.debug(&format!("evicted {}", ctx.config.cache.products_key));
            }
            if all || cart {
                ctx.cart_collection().remove().await?;
                ctx.output.debug(&format!("evicted {}", ctx.config.cache.cart_key));
            }
            if ctx.config.cache.dir.is_none() {
                ctx.output
                    .warn("No cache.dir configured; the in-memory cache is per process.");
            }
            ctx.output.success("Cache cleared");
        }
    }
    Ok(())
}
