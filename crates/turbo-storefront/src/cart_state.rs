//! Shopping cart state: the current total quantity and who to tell when
//! it changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use turbo_cache::LocalCollection;
use turbo_commerce::cart::check_unique_items;
use turbo_commerce::prelude::*;
use turbo_data::CartApi;

use crate::error::StorefrontResult;

/// Callback invoked with the new cart total.
pub type CartChangedHandler = Arc<dyn Fn(u32) + Send + Sync>;

/// Handle returned by [`ShoppingCartService::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the cart total and its subscriber list.
///
/// The total starts unknown and only changes through
/// [`raise_changed`](Self::raise_changed). Nothing recomputes it
/// automatically: after mutating the cart, call [`refresh`](Self::refresh)
/// or compute and raise the total yourself.
pub struct ShoppingCartService {
    api: Arc<dyn CartApi>,
    cache: LocalCollection<CartItem>,
    total: RwLock<Option<u32>>,
    subscribers: Mutex<Vec<(SubscriptionId, CartChangedHandler)>>,
    next_subscription: AtomicU64,
}

impl ShoppingCartService {
    /// Create the service over the remote cart and the local cart snapshot.
    pub fn new(api: Arc<dyn CartApi>, cache: LocalCollection<CartItem>) -> Self {
        Self {
            api,
            cache,
            total: RwLock::new(None),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Fetch the user's cart from the remote API and store it as the local
    /// cart snapshot.
    pub async fn get_items(&self, user_id: UserId) -> StorefrontResult<Vec<CartItem>> {
        let items = self.api.get_items(user_id).await?;
        if let Err(e) = check_unique_items(&items) {
            tracing::warn!(%user_id, error = %e, "remote cart violates item uniqueness");
        }
        self.cache.populate(&items).await?;
        Ok(items)
    }

    /// Read the local cart snapshot without contacting the remote API.
    pub async fn cached_items(&self) -> StorefrontResult<Option<Vec<CartItem>>> {
        Ok(self.cache.get().await?)
    }

    /// Sum the quantities of `items`.
    pub fn compute_total(&self, items: &[CartItem]) -> u32 {
        compute_total(items)
    }

    /// The last broadcast total, or `None` before the first broadcast.
    pub fn current_total(&self) -> Option<u32> {
        *self.total.read()
    }

    /// Record `total` and notify every subscriber, in registration order.
    ///
    /// Subscribers are snapshotted before dispatch: one registered by a
    /// handler during this call is not notified until the next one.
    pub fn raise_changed(&self, total: u32) {
        *self.total.write() = Some(total);

        let handlers: Vec<CartChangedHandler> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        tracing::info!(total, subscribers = handlers.len(), "cart total changed");
        for handler in handlers {
            handler(total);
        }
    }

    /// Register a handler for cart total changes.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() < before
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Fetch the cart, compute its total and broadcast it.
    pub async fn refresh(&self, user_id: UserId) -> StorefrontResult<u32> {
        let items = self.get_items(user_id).await?;
        let total = self.compute_total(&items);
        self.raise_changed(total);
        Ok(total)
    }

    /// Add a product to the cart. Does not broadcast.
    pub async fn add_item(&self, request: &CartItemToAdd) -> StorefrontResult<CartItem> {
        let item = self.api.add_item(request).await?;
        self.store_item(item.clone()).await?;
        Ok(item)
    }

    /// Change an item's quantity. Does not broadcast.
    pub async fn update_quantity(&self, update: &CartItemQtyUpdate) -> StorefrontResult<CartItem> {
        let item = self.api.update_qty(update).await?;
        self.store_item(item.clone()).await?;
        Ok(item)
    }

    /// Remove an item from the cart. Does not broadcast.
    pub async fn remove_item(&self, id: CartItemId) -> StorefrontResult<CartItem> {
        let item = self.api.delete_item(id).await?;
        if let Some(mut items) = self.cache.get().await? {
            items.retain(|i| i.id != id);
            self.cache.populate(&items).await?;
        }
        Ok(item)
    }

    /// Replace `item` in the local snapshot (or append it) and write the
    /// snapshot back whole.
    async fn store_item(&self, item: CartItem) -> StorefrontResult<()> {
        let mut items = self.cache.get().await?.unwrap_or_default();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        self.cache.populate(&items).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ShoppingCartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShoppingCartService")
            .field("total", &self.current_total())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use turbo_cache::{Cache, MemoryStore};
    use turbo_data::MemoryCart;

    fn service(items: Vec<CartItem>) -> ShoppingCartService {
        let cache = Cache::new(Arc::new(MemoryStore::new()));
        ShoppingCartService::new(
            Arc::new(MemoryCart::new(items)),
            LocalCollection::new(cache, "CartItemCollection"),
        )
    }

    fn recorder(service: &ShoppingCartService) -> Arc<Mutex<Vec<u32>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        service.subscribe(move |total| sink.lock().push(total));
        seen
    }

    #[test]
    fn test_total_unknown_until_raised() {
        let service = service(Vec::new());
        assert_eq!(service.current_total(), None);

        service.raise_changed(0);
        assert_eq!(service.current_total(), Some(0));
    }

    #[test]
    fn test_compute_total() {
        let service = service(Vec::new());
        assert_eq!(service.compute_total(&[]), 0);
        assert_eq!(
            service.compute_total(&[CartItem::new(1, 1, 1, 2), CartItem::new(2, 2, 1, 3)]),
            5
        );
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let service = service(Vec::new());
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["badge", "header", "footer"] {
            let order = Arc::clone(&order);
            service.subscribe(move |_| order.lock().push(name));
        }

        service.raise_changed(3);
        assert_eq!(*order.lock(), vec!["badge", "header", "footer"]);
    }

    #[test]
    fn test_every_raise_is_delivered() {
        let service = service(Vec::new());
        let seen = recorder(&service);

        service.raise_changed(1);
        service.raise_changed(1);
        service.raise_changed(4);
        assert_eq!(*seen.lock(), vec![1, 1, 4]);
    }

    #[test]
    fn test_unsubscribe() {
        let service = service(Vec::new());
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let id = service.subscribe(move |_| *sink.lock() += 1);

        service.raise_changed(1);
        assert!(service.unsubscribe(id));
        assert!(!service.unsubscribe(id));
        service.raise_changed(2);

        assert_eq!(*seen.lock(), 1);
        assert_eq!(service.subscriber_count(), 0);
    }

    #[test]
    fn test_handler_registered_mid_dispatch_waits_for_next() {
        let service = Arc::new(service(Vec::new()));
        let late = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&service);
        let late_sink = Arc::clone(&late);
        service.subscribe(move |_| {
            if let Some(service) = weak.upgrade() {
                if service.subscriber_count() == 1 {
                    let sink = Arc::clone(&late_sink);
                    service.subscribe(move |total| sink.lock().push(total));
                }
            }
        });

        service.raise_changed(1);
        assert!(late.lock().is_empty());

        service.raise_changed(2);
        assert_eq!(*late.lock(), vec![2]);
    }

    #[tokio::test]
    async fn test_refresh_fetches_and_broadcasts() {
        let service = service(vec![
            CartItem::new(1, 1, 1, 1),
            CartItem::new(2, 2, 1, 4),
            CartItem::new(3, 1, 2, 9),
        ]);
        let seen = recorder(&service);

        assert_eq!(service.refresh(UserId::new(1)).await.unwrap(), 5);
        assert_eq!(*seen.lock(), vec![5]);
        assert_eq!(service.cached_items().await.unwrap().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mutations_do_not_broadcast() {
        let service = service(vec![CartItem::new(1, 1, 1, 1)]);
        let seen = recorder(&service);
        let user = UserId::new(1);

        service.get_items(user).await.unwrap();
        let added = service
            .add_item(&CartItemToAdd::new(user, ProductId::new(2), 2).unwrap())
            .await
            .unwrap();
        service
            .update_quantity(&CartItemQtyUpdate::new(CartItemId::new(1), 6).unwrap())
            .await
            .unwrap();

        let cached = service.cached_items().await.unwrap().unwrap();
        assert_eq!(service.compute_total(&cached), 8);

        service.remove_item(added.id).await.unwrap();
        let cached = service.cached_items().await.unwrap().unwrap();
        assert_eq!(service.compute_total(&cached), 6);

        assert!(seen.lock().is_empty());
        assert_eq!(service.current_total(), None);
    }
}
