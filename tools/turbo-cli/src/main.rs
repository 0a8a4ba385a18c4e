//! Turbo Shop CLI - browse a TurboCommerce storefront from the terminal.
//!
//! Commands:
//! - `turbo-shop catalog` - Run a page activation and list products by category
//! - `turbo-shop product <id>` - Show one product
//! - `turbo-shop categories` - List product categories
//! - `turbo-shop cart` - Show the current user's cart and total
//! - `turbo-shop cache clear` - Evict the local snapshots

mod commands;
mod context;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CacheArgs, CartArgs, CatalogArgs, ProductArgs};

/// Turbo Shop - browse the catalog and cart of a TurboCommerce storefront
#[derive(Parser)]
#[command(name = "turbo-shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Serve catalog and cart from a JSON fixture instead of the API
    #[arg(long, global = true, value_name = "FIXTURE")]
    offline: Option<PathBuf>,

    /// Browse without signing in
    #[arg(long, global = true)]
    anonymous: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog grouped by category, with the cart badge
    Catalog(CatalogArgs),

    /// Show a single product
    Product(ProductArgs),

    /// List product categories
    Categories,

    /// Show the cart
    Cart(CartArgs),

    /// Manage the local cache
    Cache(CacheArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let options = context::Options {
        config_path: cli.config,
        offline: cli.offline,
        anonymous: cli.anonymous,
    };
    let ctx = match context::Context::load(options, output.clone()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init_logging(&ctx.config.logging, cli.verbose);
    match &ctx.config_source {
        Some(path) => ctx.output.debug(&format!("config: {}", path.display())),
        None => ctx.output.debug("config: defaults"),
    }

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Categories => commands::categories::run(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Cache(args) => commands::cache::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
