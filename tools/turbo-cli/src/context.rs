//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use turbo_auth::{AuthGate, Identity, StaticIdentityProvider};
use turbo_cache::{Cache, FileStore, LocalCollection, MemoryStore};
use turbo_commerce::prelude::{CartItem, Product};
use turbo_data::{CartApi, CatalogApi, CatalogFixture, FetchClient};
use turbo_storefront::config::ENV_PREFIX;
use turbo_storefront::{ProductCatalog, ProductsPage, ShoppingCartService, StorefrontConfig};

use crate::output::Output;

/// Global flags that shape the context.
#[derive(Debug, Default)]
pub struct Options {
    /// Explicit config file.
    pub config_path: Option<PathBuf>,
    /// Fixture to serve instead of the remote API.
    pub offline: Option<PathBuf>,
    /// Browse without signing in.
    pub anonymous: bool,
}

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Where the config came from, if a file was used.
    pub config_source: Option<PathBuf>,
    catalog_api: Arc<dyn CatalogApi>,
    cart_api: Arc<dyn CartApi>,
    cache: Cache,
    anonymous: bool,
}

impl Context {
    /// Load config, apply `TURBO_SHOP_*` overrides from the process
    /// environment and build the collaborators.
    pub async fn load(options: Options, output: Output) -> Result<Self> {
        Self::load_with_env(options, output, |name| {
            std::env::var(format!("{}{}", ENV_PREFIX, name)).ok()
        })
        .await
    }

    /// Like [`Context::load`], reading overrides from `env` (keyed without
    /// the prefix).
    pub async fn load_with_env<F>(options: Options, output: Output, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_source = match options.config_path {
            Some(path) => Some(resolve_path(&cwd, &path)),
            None => StorefrontConfig::discover(&cwd),
        };
        let config = match &config_source {
            Some(path) => StorefrontConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => StorefrontConfig::default(),
        };
        let config = config.with_overrides(env)?;

        let (catalog_api, cart_api): (Arc<dyn CatalogApi>, Arc<dyn CartApi>) =
            match &options.offline {
                Some(fixture) => {
                    let fixture = CatalogFixture::load(resolve_path(&cwd, fixture))
                        .await
                        .with_context(|| format!("Failed to load fixture: {}", fixture.display()))?;
                    let (catalog, cart) = fixture.into_backends();
                    let catalog: Arc<dyn CatalogApi> = Arc::new(catalog);
                    let cart: Arc<dyn CartApi> = Arc::new(cart);
                    (catalog, cart)
                }
                None => {
                    let client = FetchClient::builder(config.api.base_url.clone())
                        .timeout(config.api.timeout())
                        .build()
                        .context("Failed to build HTTP client")?;
                    let client = Arc::new(client);
                    let catalog: Arc<dyn CatalogApi> = client.clone();
                    let cart: Arc<dyn CartApi> = client;
                    (catalog, cart)
                }
            };

        let cache = match &config.cache.dir {
            Some(dir) => {
                let store = FileStore::open(resolve_path(&cwd, dir))
                    .await
                    .with_context(|| format!("Failed to open cache: {}", dir.display()))?;
                Cache::new(Arc::new(store))
            }
            None => Cache::new(Arc::new(MemoryStore::new())),
        };

        Ok(Self {
            config,
            output,
            config_source,
            catalog_api,
            cart_api,
            cache,
            anonymous: options.anonymous,
        })
    }

    /// Remote (or fixture) catalog.
    pub fn catalog_api(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.catalog_api)
    }

    /// The local product snapshot.
    pub fn product_collection(&self) -> LocalCollection<Product> {
        LocalCollection::new(self.cache.clone(), self.config.cache.products_key.clone())
    }

    /// The local cart snapshot.
    pub fn cart_collection(&self) -> LocalCollection<CartItem> {
        LocalCollection::new(self.cache.clone(), self.config.cache.cart_key.clone())
    }

    /// Gate over the CLI's identity: the configured user, or nobody with
    /// `--anonymous`.
    pub fn auth_gate(&self) -> AuthGate {
        let identity = if self.anonymous {
            Identity::anonymous()
        } else {
            Identity::authenticated(self.config.user_id, format!("user {}", self.config.user_id))
        };
        let gate = AuthGate::new(Arc::new(StaticIdentityProvider::new(identity)));
        match self.config.auth.resolve_timeout() {
            Some(limit) => gate.with_resolve_timeout(limit),
            None => gate,
        }
    }

    /// Cart state service over the cart API and the cart snapshot.
    pub fn cart_service(&self) -> Arc<ShoppingCartService> {
        Arc::new(ShoppingCartService::new(
            Arc::clone(&self.cart_api),
            self.cart_collection(),
        ))
    }

    /// Product cache over the catalog API.
    pub fn product_catalog(&self) -> ProductCatalog {
        ProductCatalog::new(self.catalog_api(), self.product_collection())
    }

    /// A products page wired to this context's collaborators.
    pub fn products_page(&self) -> ProductsPage {
        ProductsPage::new(
            self.product_catalog(),
            self.cart_service(),
            self.auth_gate(),
            self.config.user_id,
        )
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(cwd, Path::new("shop.json")), PathBuf::from("/work/shop.json"));
        assert_eq!(resolve_path(cwd, Path::new("/etc/shop.json")), PathBuf::from("/etc/shop.json"));
    }

    #[tokio::test]
    async fn test_offline_context() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("shop.json");
        std::fs::write(
            &fixture,
            r#"{
                "products": [{"id": 1, "name": "Lamp", "price": 19.99, "qty": 3,
                              "categoryId": 2, "categoryName": "Home"}],
                "cartItems": [{"id": 1, "productId": 1, "userId": 1, "qty": 2}]
            }"#,
        )
        .unwrap();

        let config = dir.path().join("turbo-shop.toml");
        std::fs::write(&config, "user_id = 1\n\n[api]\nbase_url = \"http://unused.test\"\n").unwrap();

        let options = Options {
            config_path: Some(config.clone()),
            offline: Some(fixture),
            anonymous: false,
        };
        let ctx = Context::load_with_env(options, Output::new(false, true), |_| None)
            .await
            .unwrap();
        assert_eq!(ctx.config_source, Some(config));
        assert!(ctx.config.cache.dir.is_none());

        let page = ctx.products_page();
        page.activate().await;
        assert_eq!(page.cart().current_total(), Some(2));
        assert_eq!(page.grouped_products().len(), 1);
    }
}
