//! In-memory catalog and cart backends.
//!
//! Used for offline runs against a JSON fixture and as test doubles.
//! Both support failure injection: after `fail_with`, every call fails
//! with a server error until `recover` is called.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use turbo_commerce::cart::MAX_QUANTITY_PER_ITEM;
use turbo_commerce::prelude::*;

use crate::api::{CartApi, CatalogApi};
use crate::FetchError;

/// Seed data for the in-memory backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFixture {
    /// Products; absent means the catalog answers "not found".
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    /// Product categories.
    #[serde(default)]
    pub categories: Vec<ProductCategory>,
    /// Cart items across all users.
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
}

impl CatalogFixture {
    /// Load a fixture from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FetchError::RequestError(format!("{}: {}", path.display(), e)))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Split into a catalog and a cart backend.
    pub fn into_backends(self) -> (MemoryCatalog, MemoryCart) {
        let products = self.products.clone().unwrap_or_default();
        let catalog = MemoryCatalog {
            products: RwLock::new(self.products),
            categories: RwLock::new(self.categories),
            faults: Faults::default(),
        };
        let cart = MemoryCart::new(self.cart_items).with_products(&products);
        (catalog, cart)
    }
}

#[derive(Debug, Default)]
struct Faults {
    failure: RwLock<Option<String>>,
    calls: AtomicUsize,
}

impl Faults {
    async fn enter(&self) -> Result<(), FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.read().await.as_ref() {
            Some(message) => Err(FetchError::Server {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Catalog held in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Option<Vec<Product>>>,
    categories: RwLock<Vec<ProductCategory>>,
    faults: Faults,
}

impl MemoryCatalog {
    /// Catalog serving `products`, with categories derived from them.
    pub fn new(products: Vec<Product>) -> Self {
        let categories = group_by_category(&products)
            .iter()
            .map(|g| ProductCategory::new(g.category_id, g.category_name().unwrap_or_default()))
            .collect();
        Self {
            products: RwLock::new(Some(products)),
            categories: RwLock::new(categories),
            faults: Faults::default(),
        }
    }

    /// Catalog that answers "not found" for the product list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a server error.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.faults.failure.write().await = Some(message.into());
    }

    /// Stop failing.
    pub async fn recover(&self) {
        *self.faults.failure.write().await = None;
    }

    /// Number of calls served (including failed ones).
    pub fn calls(&self) -> usize {
        self.faults.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for MemoryCatalog {
    async fn get_items(&self) -> Result<Option<Vec<Product>>, FetchError> {
        self.faults.enter().await?;
        Ok(self.products.read().await.clone())
    }

    async fn get_item(&self, id: ProductId) -> Result<Product, FetchError> {
        self.faults.enter().await?;
        self.products
            .read()
            .await
            .iter()
            .flatten()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| FetchError::BadRequest(format!("no product with id {}", id)))
    }

    async fn get_categories(&self) -> Result<Vec<ProductCategory>, FetchError> {
        self.faults.enter().await?;
        Ok(self.categories.read().await.clone())
    }

    async fn get_items_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, FetchError> {
        self.faults.enter().await?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .flatten()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }
}

/// Shopping cart held in memory.
///
/// Keeps at most one item per (user, product): adding a product already
/// in the cart grows that item's quantity.
#[derive(Debug)]
pub struct MemoryCart {
    items: RwLock<Vec<CartItem>>,
    products: HashMap<ProductId, Product>,
    next_id: AtomicI32,
    faults: Faults,
}

impl MemoryCart {
    /// Cart seeded with `items`.
    pub fn new(items: Vec<CartItem>) -> Self {
        let next_id = items.iter().map(|i| i.id.get()).max().unwrap_or(0) + 1;
        Self {
            items: RwLock::new(items),
            products: HashMap::new(),
            next_id: AtomicI32::new(next_id),
            faults: Faults::default(),
        }
    }

    /// Products used to fill in names and prices of added items.
    pub fn with_products(mut self, products: &[Product]) -> Self {
        self.products = products.iter().map(|p| (p.id, p.clone())).collect();
        self
    }

    /// Make every subsequent call fail with a server error.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.faults.failure.write().await = Some(message.into());
    }

    /// Stop failing.
    pub async fn recover(&self) {
        *self.faults.failure.write().await = None;
    }

    /// Number of calls served (including failed ones).
    pub fn calls(&self) -> usize {
        self.faults.calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryCart {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CartApi for MemoryCart {
    async fn get_items(&self, user_id: UserId) -> Result<Vec<CartItem>, FetchError> {
        self.faults.enter().await?;
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_item(&self, request: &CartItemToAdd) -> Result<CartItem, FetchError> {
        self.faults.enter().await?;
        let mut items = self.items.write().await;

        if let Some(existing) = items
            .iter_mut()
            .find(|i| i.user_id == request.user_id && i.product_id == request.product_id)
        {
            let qty = existing.qty.saturating_add(request.qty);
            if qty > MAX_QUANTITY_PER_ITEM {
                return Err(FetchError::BadRequest(format!(
                    "quantity {} exceeds maximum {}",
                    qty, MAX_QUANTITY_PER_ITEM
                )));
            }
            existing.qty = qty;
            return Ok(existing.clone());
        }

        let product = self.products.get(&request.product_id);
        if product.is_none() && !self.products.is_empty() {
            return Err(FetchError::BadRequest(format!(
                "no product with id {}",
                request.product_id
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut item = CartItem::new(id, request.product_id, request.user_id, request.qty);
        if let Some(product) = product {
            item = item.with_product(product.name.clone(), product.price);
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update_qty(&self, update: &CartItemQtyUpdate) -> Result<CartItem, FetchError> {
        self.faults.enter().await?;
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == update.cart_item_id)
            .ok_or_else(|| FetchError::NotFound(format!("cart item {}", update.cart_item_id)))?;
        item.qty = update.qty;
        Ok(item.clone())
    }

    async fn delete_item(&self, id: CartItemId) -> Result<CartItem, FetchError> {
        self.faults.enter().await?;
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| FetchError::NotFound(format!("cart item {}", id)))?;
        Ok(items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use turbo_commerce::cart::check_unique_items;

    fn product(id: i32, category: i32) -> Product {
        Product::new(id, format!("P{}", id), Decimal::TWO, category, format!("C{}", category))
    }

    #[tokio::test]
    async fn test_catalog_lookups() {
        let catalog = MemoryCatalog::new(vec![product(1, 2), product(2, 1), product(3, 2)]);

        assert_eq!(catalog.get_items().await.unwrap().unwrap().len(), 3);
        assert_eq!(catalog.get_item(ProductId::new(2)).await.unwrap().name, "P2");
        assert_eq!(
            catalog
                .get_items_by_category(CategoryId::new(2))
                .await
                .unwrap()
                .len(),
            2
        );

        let categories = catalog.get_categories().await.unwrap();
        let ids: Vec<i32> = categories.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(catalog.calls(), 4);
    }

    #[tokio::test]
    async fn test_missing_product_is_bad_request() {
        let catalog = MemoryCatalog::new(vec![product(1, 1)]);
        assert!(matches!(
            catalog.get_item(ProductId::new(9)).await,
            Err(FetchError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_catalog_is_not_found() {
        assert_eq!(MemoryCatalog::empty().get_items().await, Ok(None));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let catalog = MemoryCatalog::new(vec![product(1, 1)]);
        catalog.fail_with("database offline").await;
        assert!(catalog.get_items().await.unwrap_err().is_data_access());

        catalog.recover().await;
        assert!(catalog.get_items().await.is_ok());
    }

    #[tokio::test]
    async fn test_cart_add_merges_same_product() {
        let cart = MemoryCart::default().with_products(&[product(4, 1)]);
        let user = UserId::new(1);

        let first = cart
            .add_item(&CartItemToAdd::new(user, ProductId::new(4), 1).unwrap())
            .await
            .unwrap();
        let second = cart
            .add_item(&CartItemToAdd::new(user, ProductId::new(4), 2).unwrap())
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.qty, 3);
        assert_eq!(second.product_name, "P4");

        let items = cart.get_items(user).await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(check_unique_items(&items).is_ok());
    }

    #[tokio::test]
    async fn test_cart_add_unknown_product() {
        let cart = MemoryCart::default().with_products(&[product(4, 1)]);
        let request = CartItemToAdd::new(UserId::new(1), ProductId::new(5), 1).unwrap();
        assert!(matches!(
            cart.add_item(&request).await,
            Err(FetchError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_cart_update_and_delete() {
        let cart = MemoryCart::new(vec![CartItem::new(7, 1, 1, 1), CartItem::new(8, 2, 2, 5)]);

        let updated = cart
            .update_qty(&CartItemQtyUpdate::new(CartItemId::new(7), 4).unwrap())
            .await
            .unwrap();
        assert_eq!(updated.qty, 4);

        let removed = cart.delete_item(CartItemId::new(7)).await.unwrap();
        assert_eq!(removed.id, CartItemId::new(7));
        assert!(cart.get_items(UserId::new(1)).await.unwrap().is_empty());
        assert_eq!(cart.get_items(UserId::new(2)).await.unwrap().len(), 1);

        assert!(matches!(
            cart.delete_item(CartItemId::new(7)).await,
            Err(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_new_ids_follow_seed() {
        let cart = MemoryCart::new(vec![CartItem::new(41, 1, 1, 1)]);
        let item = cart
            .add_item(&CartItemToAdd::new(UserId::new(1), ProductId::new(2), 1).unwrap())
            .await
            .unwrap();
        assert_eq!(item.id, CartItemId::new(42));
    }

    #[tokio::test]
    async fn test_fixture_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.json");
        tokio::fs::write(
            &path,
            r#"{
                "products": [
                    {"id": 1, "name": "Lamp", "price": 12.5, "categoryId": 2, "categoryName": "Furniture"}
                ],
                "cartItems": [{"id": 1, "productId": 1, "userId": 1, "qty": 2}]
            }"#,
        )
        .await
        .unwrap();

        let (catalog, cart) = CatalogFixture::load(&path).await.unwrap().into_backends();
        assert_eq!(catalog.get_items().await.unwrap().unwrap()[0].name, "Lamp");
        assert_eq!(cart.get_items(UserId::new(1)).await.unwrap()[0].qty, 2);
    }
}
