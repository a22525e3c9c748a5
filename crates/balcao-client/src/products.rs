//! # Products State
//!
//! Caches the catalog for the products screen. Same shape as the customers
//! container, plus the stock side: manual movements patch the cached
//! balance in place, and a few derived reads answer availability questions
//! without a backend round trip.
//!
//! The lock is never held across an `await`; every service call runs
//! between two short lock windows.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use balcao_backend::{BackendResult, ProductService};
use balcao_core::{
    CreateProductRequest, CreateStockMovementRequest, ListProductsQuery, Money, Pagination,
    Product, ProductType, StockMovement, UpdateProductRequest,
};

use crate::status::LoadingStatus;

/// Everything the products screen binds to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsSnapshot {
    /// Current page of the catalog.
    pub products: Vec<Product>,

    /// Product open in the detail view, if any.
    pub current: Option<Product>,

    /// Pagination of the last fetched page.
    pub pagination: Option<Pagination>,

    /// Query that produced the cached page.
    pub last_query: ListProductsQuery,

    /// Status of the last read (list/get).
    pub loading: LoadingStatus,

    /// Status of the last write (create/update/delete/movement).
    pub saving: LoadingStatus,

    /// Message of the last failed call, cleared when a new one starts.
    pub error: Option<String>,
}

/// Shared products container.
#[derive(Debug, Clone)]
pub struct ProductsState {
    service: ProductService,
    inner: Arc<Mutex<ProductsSnapshot>>,
}

impl ProductsState {
    /// Creates an empty container over the given service.
    pub fn new(service: ProductService) -> Self {
        ProductsState {
            service,
            inner: Arc::new(Mutex::new(ProductsSnapshot::default())),
        }
    }

    /// Executes a function with read access to the snapshot.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ProductsSnapshot) -> R,
    {
        let snapshot = self.inner.lock().expect("Products mutex poisoned");
        f(&snapshot)
    }

    /// Returns a full copy of the snapshot.
    pub fn snapshot(&self) -> ProductsSnapshot {
        self.with_state(ProductsSnapshot::clone)
    }

    fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ProductsSnapshot) -> R,
    {
        let mut snapshot = self.inner.lock().expect("Products mutex poisoned");
        f(&mut snapshot)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches one page of the catalog and replaces the cached list.
    pub async fn fetch_list(&self, query: ListProductsQuery) {
        self.with_state_mut(|s| {
            s.loading = LoadingStatus::Pending;
            s.error = None;
        });

        let page = self.service.list(&query).await;
        debug!(total = page.pagination.total, "Product list refreshed");

        self.with_state_mut(|s| {
            s.products = page.data;
            s.pagination = Some(page.pagination);
            s.last_query = query;
            s.loading = LoadingStatus::Fulfilled;
        });
    }

    /// Fetches one product into the detail slot.
    pub async fn fetch_one(&self, id: &str) -> BackendResult<Product> {
        self.with_state_mut(|s| {
            s.loading = LoadingStatus::Pending;
            s.error = None;
        });

        match self.service.get(id).await {
            Ok(product) => {
                self.with_state_mut(|s| {
                    s.current = Some(product.clone());
                    s.loading = LoadingStatus::Fulfilled;
                });
                Ok(product)
            }
            Err(err) => {
                warn!(id = %id, error = %err, "Product fetch failed");
                self.with_state_mut(|s| {
                    s.error = Some(err.to_string());
                    s.loading = LoadingStatus::Rejected;
                });
                Err(err)
            }
        }
    }

    /// Movement history for one product, newest first. Not cached.
    pub async fn stock_movements(&self, product_id: &str) -> Vec<StockMovement> {
        self.service.stock_movements(product_id).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates a product and folds it into the cached list.
    ///
    /// Prepended only when a list has already been fetched, same as the
    /// customers container.
    pub async fn create(&self, request: CreateProductRequest) -> BackendResult<Product> {
        self.begin_save();
        let result = self.service.create(request).await;
        self.finish_save(result, |s, product: &Product| {
            if s.loading.is_fulfilled() {
                s.products.insert(0, product.clone());
            }
        })
    }

    /// Updates a product, patching both the list row and the detail slot.
    pub async fn update(&self, id: &str, request: UpdateProductRequest) -> BackendResult<Product> {
        self.begin_save();
        let result = self.service.update(id, request).await;
        self.finish_save(result, patch_cached)
    }

    /// Flips the active flag, patching the cache like an update.
    pub async fn set_active(&self, id: &str, is_active: bool) -> BackendResult<Product> {
        self.begin_save();
        let result = self.service.set_active(id, is_active).await;
        self.finish_save(result, patch_cached)
    }

    /// Deletes a product and drops it from the cache.
    pub async fn delete(&self, id: &str) -> BackendResult<Product> {
        self.begin_save();
        let result = self.service.delete(id).await;
        self.finish_save(result, |s, product: &Product| {
            s.products.retain(|p| p.id != product.id);
            if s.current.as_ref().is_some_and(|p| p.id == product.id) {
                s.current = None;
            }
        })
    }

    /// Records a manual stock movement and patches the cached balance.
    ///
    /// Only the balance is patched; timestamps and anything else the write
    /// touched refresh on the next `fetch_list`.
    pub async fn add_stock_movement(
        &self,
        product_id: &str,
        request: CreateStockMovementRequest,
    ) -> BackendResult<StockMovement> {
        self.begin_save();
        let result = self.service.add_stock_movement(product_id, request).await;
        self.finish_save(result, |s, movement: &StockMovement| {
            if let Some(product) = s.products.iter_mut().find(|p| p.id == movement.product_id) {
                product.stock = Some(movement.stock_after);
            }
            if let Some(current) = s
                .current
                .as_mut()
                .filter(|p| p.id == movement.product_id)
            {
                current.stock = Some(movement.stock_after);
            }
        })
    }

    /// Checks whether a SKU is already taken, for form feedback.
    pub async fn check_sku(&self, sku: &str, exclude_id: Option<&str>) -> bool {
        self.service.sku_exists(sku, exclude_id).await
    }

    fn begin_save(&self) {
        self.with_state_mut(|s| {
            s.saving = LoadingStatus::Pending;
            s.error = None;
        });
    }

    fn finish_save<T, F>(&self, result: BackendResult<T>, apply: F) -> BackendResult<T>
    where
        F: FnOnce(&mut ProductsSnapshot, &T),
    {
        match result {
            Ok(value) => {
                self.with_state_mut(|s| {
                    apply(s, &value);
                    s.saving = LoadingStatus::Fulfilled;
                });
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "Product save failed");
                self.with_state_mut(|s| {
                    s.error = Some(err.to_string());
                    s.saving = LoadingStatus::Rejected;
                });
                Err(err)
            }
        }
    }

    // =========================================================================
    // Derived Reads (over the cache, no backend call)
    // =========================================================================

    /// Active catalog entries from the cached page, for pickers.
    pub fn active(&self) -> Vec<Product> {
        self.with_state(|s| s.products.iter().filter(|p| p.is_active).cloned().collect())
    }

    /// Cached entries of one type.
    pub fn by_type(&self, product_type: ProductType) -> Vec<Product> {
        self.with_state(|s| {
            s.products
                .iter()
                .filter(|p| p.product_type == product_type)
                .cloned()
                .collect()
        })
    }

    /// Cached entries below their alert threshold.
    pub fn low_stock(&self) -> Vec<Product> {
        self.with_state(|s| {
            s.products
                .iter()
                .filter(|p| p.is_below_min_stock())
                .cloned()
                .collect()
        })
    }

    /// Sale value of everything on hand, summed over the cached page.
    pub fn total_stock_value(&self) -> Money {
        self.with_state(|s| s.products.iter().map(Product::stock_value).sum())
    }

    /// True when the cached entry can fulfill `quantity` units.
    ///
    /// Unknown ids read as unavailable; refresh the list before trusting
    /// a negative answer.
    pub fn is_available(&self, product_id: &str, quantity: i64) -> bool {
        self.with_state(|s| {
            s.products
                .iter()
                .find(|p| p.id == product_id)
                .is_some_and(|p| p.can_fulfill(quantity))
        })
    }
}

/// Replaces the saved record wherever the cache holds it.
fn patch_cached(s: &mut ProductsSnapshot, product: &Product) {
    if let Some(slot) = s.products.iter_mut().find(|p| p.id == product.id) {
        *slot = product.clone();
    }
    if s.current.as_ref().is_some_and(|p| p.id == product.id) {
        s.current = Some(product.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_backend::{Backend, BackendConfig};
    use balcao_core::{StockMovementReason, StockMovementType};

    fn state() -> ProductsState {
        let backend = Backend::new(BackendConfig::instant());
        ProductsState::new(backend.products())
    }

    fn tracked_request(sku: &str, name: &str, stock: i64, min_stock: i64) -> CreateProductRequest {
        CreateProductRequest {
            sku: sku.to_string(),
            name: name.to_string(),
            description: None,
            product_type: ProductType::Product,
            price: Money::from_cents(5_000),
            cost_price: None,
            stock: Some(stock),
            min_stock: Some(min_stock),
            unit: Some("un".to_string()),
            brand: None,
            is_active: None,
        }
    }

    fn movement(quantity: i64, movement_type: StockMovementType) -> CreateStockMovementRequest {
        CreateStockMovementRequest {
            quantity,
            movement_type,
            reason: StockMovementReason::Adjustment,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_movement_patches_cached_balance() {
        let state = state();
        state.fetch_list(ListProductsQuery::default()).await;
        let product = state
            .create(tracked_request("MOUSE001", "Mouse Gamer", 10, 5))
            .await
            .unwrap();
        state.fetch_one(&product.id).await.unwrap();

        let recorded = state
            .add_stock_movement(&product.id, movement(5, StockMovementType::Inbound))
            .await
            .unwrap();

        assert_eq!(recorded.stock_after, 15);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.products[0].stock, Some(15));
        assert_eq!(snapshot.current.unwrap().stock, Some(15));
    }

    #[tokio::test]
    async fn test_failed_movement_keeps_cache() {
        let state = state();
        state.fetch_list(ListProductsQuery::default()).await;
        let product = state
            .create(tracked_request("MOUSE001", "Mouse Gamer", 10, 5))
            .await
            .unwrap();

        let result = state
            .add_stock_movement(&product.id, movement(999, StockMovementType::Outbound))
            .await;

        assert!(result.is_err());
        let snapshot = state.snapshot();
        assert_eq!(snapshot.products[0].stock, Some(10));
        assert!(snapshot.saving.is_rejected());
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Estoque insuficiente para o produto Mouse Gamer")
        );
    }

    #[tokio::test]
    async fn test_is_available_reads_the_cache() {
        let state = state();
        state.fetch_list(ListProductsQuery::default()).await;
        let product = state
            .create(tracked_request("MOUSE001", "Mouse Gamer", 10, 5))
            .await
            .unwrap();

        assert!(state.is_available(&product.id, 10));
        assert!(!state.is_available(&product.id, 11));
        assert!(!state.is_available("unknown", 1));
    }

    #[tokio::test]
    async fn test_derived_stock_reads() {
        let state = state();
        state.fetch_list(ListProductsQuery::default()).await;
        state
            .create(tracked_request("CABO001", "Cabo HDMI", 2, 5))
            .await
            .unwrap();
        state
            .create(tracked_request("MOUSE001", "Mouse Gamer", 50, 5))
            .await
            .unwrap();

        let low = state.low_stock();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].sku, "CABO001");

        // 52 units at R$ 50,00 each.
        assert_eq!(state.total_stock_value(), Money::from_cents(260_000));
    }

    #[tokio::test]
    async fn test_movement_history_passthrough() {
        let state = state();
        state.fetch_list(ListProductsQuery::default()).await;
        let product = state
            .create(tracked_request("MOUSE001", "Mouse Gamer", 10, 5))
            .await
            .unwrap();
        state
            .add_stock_movement(&product.id, movement(5, StockMovementType::Inbound))
            .await
            .unwrap();

        let history = state.stock_movements(&product.id).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].stock_before, 10);
    }
}
