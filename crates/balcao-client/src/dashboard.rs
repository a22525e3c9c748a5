//! # Dashboard State
//!
//! One container for the opening screen: headline metrics, the latest
//! sales, stock alerts and the top seller ranking, refreshed together.
//!
//! There is no `error` field here. Every dashboard read aggregates over
//! whatever the store holds and cannot fail, so the only states are
//! "never loaded", "loading" and "loaded".

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

use balcao_backend::DashboardService;
use balcao_core::{DashboardMetrics, Product, Sale, TopProduct};

use crate::status::LoadingStatus;

/// How many recent sales the opening screen shows.
const RECENT_SALES_LIMIT: usize = 5;

/// How many entries the top seller ranking shows.
const TOP_PRODUCTS_LIMIT: usize = 5;

/// Everything the opening screen binds to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Headline numbers. `None` until the first refresh.
    pub metrics: Option<DashboardMetrics>,

    /// Latest sales by business date.
    pub recent_sales: Vec<Sale>,

    /// Products below their alert threshold, lowest balance first.
    pub low_stock: Vec<Product>,

    /// Best sellers by completed revenue.
    pub top_products: Vec<TopProduct>,

    /// Status of the last refresh.
    pub loading: LoadingStatus,
}

/// Shared dashboard container.
#[derive(Debug, Clone)]
pub struct DashboardState {
    service: DashboardService,
    inner: Arc<Mutex<DashboardSnapshot>>,
}

impl DashboardState {
    /// Creates an empty container over the given service.
    pub fn new(service: DashboardService) -> Self {
        DashboardState {
            service,
            inner: Arc::new(Mutex::new(DashboardSnapshot::default())),
        }
    }

    /// Executes a function with read access to the snapshot.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DashboardSnapshot) -> R,
    {
        let snapshot = self.inner.lock().expect("Dashboard mutex poisoned");
        f(&snapshot)
    }

    /// Returns a full copy of the snapshot.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.with_state(DashboardSnapshot::clone)
    }

    fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut DashboardSnapshot) -> R,
    {
        let mut snapshot = self.inner.lock().expect("Dashboard mutex poisoned");
        f(&mut snapshot)
    }

    /// Refreshes every panel of the opening screen.
    ///
    /// The four reads run back to back and fold in together, so the
    /// screen never shows metrics from one refresh next to a ranking
    /// from another.
    pub async fn refresh_all(&self) {
        self.with_state_mut(|s| s.loading = LoadingStatus::Pending);

        let metrics = self.service.metrics().await;
        let recent_sales = self.service.recent_sales(RECENT_SALES_LIMIT).await;
        let low_stock = self.service.low_stock_products().await;
        let top_products = self.service.top_products(TOP_PRODUCTS_LIMIT).await;

        debug!(
            completed = metrics.completed_sales,
            low_stock = low_stock.len(),
            "Dashboard refreshed"
        );

        self.with_state_mut(|s| {
            s.metrics = Some(metrics);
            s.recent_sales = recent_sales;
            s.low_stock = low_stock;
            s.top_products = top_products;
            s.loading = LoadingStatus::Fulfilled;
        });
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
        CreateCustomerRequest, CreateProductRequest, CreateSaleRequest, CustomerType, Money,
        PaymentMethod, ProductType, SaleItemRequest,
    };
    use chrono::Utc;

    #[tokio::test]
    async fn test_empty_backend_reads_zeroes() {
        let backend = Backend::new(BackendConfig::instant());
        let state = DashboardState::new(backend.dashboard());

        state.refresh_all().await;

        let snapshot = state.snapshot();
        assert!(snapshot.loading.is_fulfilled());
        let metrics = snapshot.metrics.unwrap();
        assert_eq!(metrics.completed_sales, 0);
        assert!(metrics.total_revenue.is_zero());
        assert!(snapshot.recent_sales.is_empty());
        assert!(snapshot.low_stock.is_empty());
        assert!(snapshot.top_products.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_populates_every_panel() {
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
                min_stock: Some(5),
                unit: Some("un".to_string()),
                brand: None,
                is_active: None,
            })
            .await
            .unwrap();

        // Selling 6 of 10 drops the balance below the threshold of 5.
        backend
            .sales()
            .create(CreateSaleRequest {
                date: Utc::now().date_naive(),
                customer_id: customer.id,
                items: vec![SaleItemRequest {
                    id: None,
                    product_id: product.id,
                    quantity: 6,
                    price: Money::from_cents(10_000),
                    discount: None,
                    notes: None,
                }],
                discount: None,
                payment_method: PaymentMethod::Pix,
                notes: None,
            })
            .await
            .unwrap();

        let state = DashboardState::new(backend.dashboard());
        state.refresh_all().await;

        let snapshot = state.snapshot();
        let metrics = snapshot.metrics.unwrap();
        assert_eq!(metrics.completed_sales, 1);
        assert_eq!(metrics.total_revenue, Money::from_cents(60_000));
        assert_eq!(metrics.low_stock_count, 1);

        assert_eq!(snapshot.recent_sales.len(), 1);
        assert_eq!(snapshot.low_stock.len(), 1);
        assert_eq!(snapshot.low_stock[0].sku, "MOUSE001");
        assert_eq!(snapshot.top_products.len(), 1);
        assert_eq!(snapshot.top_products[0].quantity, 6);
    }
}
