//! # Sales State
//!
//! Caches the sale list for the sales screen.
//!
//! ## Cache Discipline
//! Sales are where a stale cache hurts most, so the rules are strict:
//! 1. Writes only fold in what the backend returned, never what was sent
//! 2. Cancel goes through its own operation and patches the row in place,
//!    so the screen flips to "cancelada" without a refetch
//! 3. Stock is the products container's problem: after a sale mutates,
//!    the products screen refreshes itself on navigation
//!
//! The lock is never held across an `await`.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use balcao_backend::{BackendResult, SaleService};
use balcao_core::{
    CreateSaleRequest, ListSalesQuery, Money, Pagination, Sale, SaleStatus, UpdateSaleRequest,
};

use crate::status::LoadingStatus;

/// How far back `recent()` looks, in days of business date.
const RECENT_WINDOW_DAYS: i64 = 30;

/// Everything the sales screen binds to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSnapshot {
    /// Current page of the sale list.
    pub sales: Vec<Sale>,

    /// Sale open in the detail view, if any.
    pub current: Option<Sale>,

    /// Pagination of the last fetched page.
    pub pagination: Option<Pagination>,

    /// Query that produced the cached page.
    pub last_query: ListSalesQuery,

    /// Status of the last read (list/get).
    pub loading: LoadingStatus,

    /// Status of the last write (create/update/cancel/delete).
    pub saving: LoadingStatus,

    /// Message of the last failed call, cleared when a new one starts.
    pub error: Option<String>,
}

/// Shared sales container.
#[derive(Debug, Clone)]
pub struct SalesState {
    service: SaleService,
    inner: Arc<Mutex<SalesSnapshot>>,
}

impl SalesState {
    /// Creates an empty container over the given service.
    pub fn new(service: SaleService) -> Self {
        SalesState {
            service,
            inner: Arc::new(Mutex::new(SalesSnapshot::default())),
        }
    }

    /// Executes a function with read access to the snapshot.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SalesSnapshot) -> R,
    {
        let snapshot = self.inner.lock().expect("Sales mutex poisoned");
        f(&snapshot)
    }

    /// Returns a full copy of the snapshot.
    pub fn snapshot(&self) -> SalesSnapshot {
        self.with_state(SalesSnapshot::clone)
    }

    fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SalesSnapshot) -> R,
    {
        let mut snapshot = self.inner.lock().expect("Sales mutex poisoned");
        f(&mut snapshot)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches one page of sales and replaces the cached list.
    pub async fn fetch_list(&self, query: ListSalesQuery) {
        self.with_state_mut(|s| {
            s.loading = LoadingStatus::Pending;
            s.error = None;
        });

        let page = self.service.list(&query).await;
        debug!(total = page.pagination.total, "Sale list refreshed");

        self.with_state_mut(|s| {
            s.sales = page.data;
            s.pagination = Some(page.pagination);
            s.last_query = query;
            s.loading = LoadingStatus::Fulfilled;
        });
    }

    /// Fetches one sale into the detail slot.
    pub async fn fetch_one(&self, id: &str) -> BackendResult<Sale> {
        self.with_state_mut(|s| {
            s.loading = LoadingStatus::Pending;
            s.error = None;
        });

        match self.service.get(id).await {
            Ok(sale) => {
                self.with_state_mut(|s| {
                    s.current = Some(sale.clone());
                    s.loading = LoadingStatus::Fulfilled;
                });
                Ok(sale)
            }
            Err(err) => {
                warn!(id = %id, error = %err, "Sale fetch failed");
                self.with_state_mut(|s| {
                    s.error = Some(err.to_string());
                    s.loading = LoadingStatus::Rejected;
                });
                Err(err)
            }
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Records a sale and folds it into the cached list.
    ///
    /// Prepended only when a list has already been fetched; the backend
    /// also keeps sales newest-first, so the orders agree.
    pub async fn create(&self, request: CreateSaleRequest) -> BackendResult<Sale> {
        self.begin_save();
        let result = self.service.create(request).await;
        self.finish_save(result, |s, sale| {
            if s.loading.is_fulfilled() {
                s.sales.insert(0, sale.clone());
            }
        })
    }

    /// Edits a sale, patching both the list row and the detail slot.
    pub async fn update(&self, id: &str, request: UpdateSaleRequest) -> BackendResult<Sale> {
        self.begin_save();
        let result = self.service.update(id, request).await;
        self.finish_save(result, patch_cached)
    }

    /// Cancels a sale. The cached row flips to canceled in place.
    pub async fn cancel(&self, id: &str) -> BackendResult<Sale> {
        self.begin_save();
        let result = self.service.cancel(id).await;
        self.finish_save(result, patch_cached)
    }

    /// Deletes a sale and drops it from the cache.
    pub async fn delete(&self, id: &str) -> BackendResult<Sale> {
        self.begin_save();
        let result = self.service.delete(id).await;
        self.finish_save(result, |s, sale| {
            s.sales.retain(|cached| cached.id != sale.id);
            if s.current.as_ref().is_some_and(|c| c.id == sale.id) {
                s.current = None;
            }
        })
    }

    fn begin_save(&self) {
        self.with_state_mut(|s| {
            s.saving = LoadingStatus::Pending;
            s.error = None;
        });
    }

    fn finish_save<F>(&self, result: BackendResult<Sale>, apply: F) -> BackendResult<Sale>
    where
        F: FnOnce(&mut SalesSnapshot, &Sale),
    {
        match result {
            Ok(sale) => {
                self.with_state_mut(|s| {
                    apply(s, &sale);
                    s.saving = LoadingStatus::Fulfilled;
                });
                Ok(sale)
            }
            Err(err) => {
                warn!(error = %err, "Sale save failed");
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

    /// Cached sales in one status.
    pub fn by_status(&self, status: SaleStatus) -> Vec<Sale> {
        self.with_state(|s| {
            s.sales
                .iter()
                .filter(|sale| sale.status == status)
                .cloned()
                .collect()
        })
    }

    /// Cached sales whose business date falls in the last 30 days.
    pub fn recent(&self) -> Vec<Sale> {
        let cutoff = Utc::now().date_naive() - Duration::days(RECENT_WINDOW_DAYS);
        self.with_state(|s| {
            s.sales
                .iter()
                .filter(|sale| sale.date >= cutoff)
                .cloned()
                .collect()
        })
    }

    /// Sum of completed sale totals over the cached page.
    pub fn completed_revenue(&self) -> Money {
        self.with_state(|s| {
            s.sales
                .iter()
                .filter(|sale| sale.status == SaleStatus::Completed)
                .map(|sale| sale.total)
                .sum()
        })
    }
}

/// Replaces the saved record wherever the cache holds it.
fn patch_cached(s: &mut SalesSnapshot, sale: &Sale) {
    if let Some(slot) = s.sales.iter_mut().find(|cached| cached.id == sale.id) {
        *slot = sale.clone();
    }
    if s.current.as_ref().is_some_and(|c| c.id == sale.id) {
        s.current = Some(sale.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_backend::{Backend, BackendConfig};
    use balcao_core::{
        CreateCustomerRequest, CreateProductRequest, CustomerType, PaymentMethod, ProductType,
        SaleItemRequest,
    };
    use chrono::NaiveDate;

    /// Backend with one customer and one tracked product (10 on hand).
    async fn setup() -> (Backend, SalesState, String, String) {
        let backend = Backend::new(BackendConfig::instant());

        let customer = backend
            .customers()
            .create(CreateCustomerRequest {
                name: "João Silva".to_string(),
                customer_type: CustomerType::Physical,
                document: None,
                email: None,
                phone: None,
                notes: None,
                is_active: None,
            })
            .await
            .unwrap();

        let product = backend
            .products()
            .create(CreateProductRequest {
                sku: "MOUSE001".to_string(),
                name: "Mouse Gamer".to_string(),
                description: None,
                product_type: ProductType::Product,
                price: Money::from_cents(10_000),
                cost_price: None,
                stock: Some(10),
                min_stock: Some(2),
                unit: Some("un".to_string()),
                brand: None,
                is_active: None,
            })
            .await
            .unwrap();

        let state = SalesState::new(backend.sales());
        (backend, state, customer.id, product.id)
    }

    fn sale_request(
        customer_id: &str,
        product_id: &str,
        quantity: i64,
        date: NaiveDate,
    ) -> CreateSaleRequest {
        CreateSaleRequest {
            date,
            customer_id: customer_id.to_string(),
            items: vec![SaleItemRequest {
                id: None,
                product_id: product_id.to_string(),
                quantity,
                price: Money::from_cents(10_000),
                discount: None,
                notes: None,
            }],
            discount: None,
            payment_method: PaymentMethod::Pix,
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[tokio::test]
    async fn test_create_prepends_and_backend_debits_stock() {
        let (backend, state, customer_id, product_id) = setup().await;
        state.fetch_list(ListSalesQuery::default()).await;

        let sale = state
            .create(sale_request(&customer_id, &product_id, 3, today()))
            .await
            .unwrap();

        assert_eq!(sale.code, "VND-001");
        let snapshot = state.snapshot();
        assert_eq!(snapshot.sales.len(), 1);
        assert_eq!(snapshot.sales[0].id, sale.id);

        let product = backend.products().get(&product_id).await.unwrap();
        assert_eq!(product.stock, Some(7));
    }

    #[tokio::test]
    async fn test_cancel_patches_row_and_detail() {
        let (_backend, state, customer_id, product_id) = setup().await;
        state.fetch_list(ListSalesQuery::default()).await;
        let sale = state
            .create(sale_request(&customer_id, &product_id, 3, today()))
            .await
            .unwrap();
        state.fetch_one(&sale.id).await.unwrap();

        state.cancel(&sale.id).await.unwrap();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.sales[0].status, SaleStatus::Canceled);
        assert_eq!(snapshot.current.unwrap().status, SaleStatus::Canceled);
    }

    #[tokio::test]
    async fn test_failed_create_records_error_and_keeps_cache() {
        let (_backend, state, customer_id, product_id) = setup().await;
        state.fetch_list(ListSalesQuery::default()).await;

        let result = state
            .create(sale_request(&customer_id, &product_id, 99, today()))
            .await;

        assert!(result.is_err());
        let snapshot = state.snapshot();
        assert!(snapshot.sales.is_empty());
        assert!(snapshot.saving.is_rejected());
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Estoque insuficiente para o produto Mouse Gamer")
        );
    }

    #[tokio::test]
    async fn test_delete_drops_row() {
        let (_backend, state, customer_id, product_id) = setup().await;
        state.fetch_list(ListSalesQuery::default()).await;
        let sale = state
            .create(sale_request(&customer_id, &product_id, 2, today()))
            .await
            .unwrap();

        state.delete(&sale.id).await.unwrap();

        assert!(state.snapshot().sales.is_empty());
    }

    #[tokio::test]
    async fn test_derived_reads() {
        let (_backend, state, customer_id, product_id) = setup().await;
        state.fetch_list(ListSalesQuery::default()).await;

        let old_date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        state
            .create(sale_request(&customer_id, &product_id, 2, old_date))
            .await
            .unwrap();
        let fresh = state
            .create(sale_request(&customer_id, &product_id, 3, today()))
            .await
            .unwrap();
        state.cancel(&fresh.id).await.unwrap();

        assert_eq!(state.by_status(SaleStatus::Completed).len(), 1);
        assert_eq!(state.by_status(SaleStatus::Canceled).len(), 1);

        let recent = state.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, fresh.id);

        // Only the completed sale counts: 2 × R$ 100,00.
        assert_eq!(state.completed_revenue(), Money::from_cents(20_000));
    }
}
