//! Catalog page controller.
//!
//! Runs the page activation protocol and holds what the catalog page
//! shows: the product snapshot, its grouping by category, and an error
//! slot for failed activations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::Instrument;
use turbo_auth::AuthGate;
use turbo_commerce::prelude::*;

use crate::cart_state::ShoppingCartService;
use crate::catalog::ProductCatalog;
use crate::error::StorefrontResult;

/// How an activation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// All steps ran and the cart total was broadcast.
    Completed {
        /// Total that was broadcast (zero for anonymous sessions).
        total: u32,
        /// Whether the session was authenticated.
        authorized: bool,
    },
    /// A step failed; the message is in the page error slot.
    Failed(String),
    /// A later activation started first; nothing was applied.
    Superseded,
}

#[derive(Debug, Default)]
struct PageState {
    products: Option<Vec<Product>>,
    error_message: Option<String>,
}

/// The products page.
///
/// Collaborators are passed in explicitly. The page owns the product
/// snapshot lifecycle; the cart service owns the total.
pub struct ProductsPage {
    catalog: ProductCatalog,
    cart: Arc<ShoppingCartService>,
    auth: AuthGate,
    user_id: UserId,
    generation: AtomicU64,
    state: RwLock<PageState>,
}

impl ProductsPage {
    /// Create a page. `user_id` is the cart owner used when the
    /// authenticated identity does not carry one.
    pub fn new(
        catalog: ProductCatalog,
        cart: Arc<ShoppingCartService>,
        auth: AuthGate,
        user_id: UserId,
    ) -> Self {
        Self {
            catalog,
            cart,
            auth,
            user_id,
            generation: AtomicU64::new(0),
            state: RwLock::new(PageState::default()),
        }
    }

    /// Run one activation:
    ///
    /// 1. evict the product snapshot,
    /// 2. reload it (from the remote catalog on a miss),
    /// 3. resolve the session,
    /// 4. broadcast the cart total, or zero for an anonymous session.
    ///
    /// Steps run strictly in order. A failure stops the remaining steps,
    /// lands in the error slot and broadcasts nothing; the products shown
    /// before the activation stay. If another activation starts while
    /// this one is suspended, this one's results are dropped.
    pub async fn activate(&self) -> ActivationOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let span = tracing::info_span!("activation", generation, user_id = %self.user_id);

        async {
            tracing::info!("activation started");
            match self.run(generation).await {
                Ok(Some((products, total, authorized))) => {
                    let mut state = self.state.write();
                    state.products = products;
                    state.error_message = None;
                    tracing::info!(total, authorized, "activation finished");
                    ActivationOutcome::Completed { total, authorized }
                }
                Ok(None) => {
                    tracing::info!("activation superseded");
                    ActivationOutcome::Superseded
                }
                Err(_) if !self.is_current(generation) => {
                    tracing::info!("superseded activation failed, dropping error");
                    ActivationOutcome::Superseded
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::warn!(error = %message, "activation failed");
                    self.state.write().error_message = Some(message.clone());
                    ActivationOutcome::Failed(message)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Steps 1 to 4. `Ok(None)` when superseded before the broadcast.
    async fn run(
        &self,
        generation: u64,
    ) -> StorefrontResult<Option<(Option<Vec<Product>>, u32, bool)>> {
        self.catalog.clear().await?;
        let products = self.catalog.get_collection().await?;

        let session = self.auth.resolve().await?;
        let authorized = session.is_authenticated();

        let total = if authorized {
            let user_id = session.user_id().unwrap_or(self.user_id);
            let items = self.cart.get_items(user_id).await?;
            self.cart.compute_total(&items)
        } else {
            0
        };

        if !self.is_current(generation) {
            return Ok(None);
        }
        self.cart.raise_changed(total);
        Ok(Some((products, total, authorized)))
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Number of activations started so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Current product snapshot. `None` before the first successful
    /// activation or when the catalog has no products.
    pub fn products(&self) -> Option<Vec<Product>> {
        self.state.read().products.clone()
    }

    /// Message of the last failed activation, cleared by a successful one.
    pub fn error_message(&self) -> Option<String> {
        self.state.read().error_message.clone()
    }

    /// Current products grouped by category, ascending by category id.
    pub fn grouped_products(&self) -> Vec<CategoryGroup> {
        self.state
            .read()
            .products
            .as_deref()
            .map(group_by_category)
            .unwrap_or_default()
    }

    /// Display name of a group's category.
    pub fn category_name<'a>(&self, group: &'a CategoryGroup) -> Option<&'a str> {
        group.category_name()
    }

    /// The cart service this page broadcasts through.
    pub fn cart(&self) -> &Arc<ShoppingCartService> {
        &self.cart
    }
}

impl std::fmt::Debug for ProductsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductsPage")
            .field("user_id", &self.user_id)
            .field("generation", &self.generation())
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
