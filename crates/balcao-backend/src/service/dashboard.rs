//! # Dashboard Service
//!
//! Read-only aggregates over the live collections. Nothing here caches:
//! every call recomputes from the store, so the dashboard always agrees
//! with the lists.

use std::collections::HashMap;
use std::time::Duration;

use balcao_core::{DashboardMetrics, Money, Product, Sale, SaleStatus, TopProduct};

use crate::service::simulate_latency;
use crate::store::MemoryStore;

/// Service computing the dashboard aggregates.
#[derive(Debug, Clone)]
pub struct DashboardService {
    store: MemoryStore,
    latency: Duration,
}

impl DashboardService {
    /// Creates a new DashboardService.
    pub fn new(store: MemoryStore, latency: Duration) -> Self {
        DashboardService { store, latency }
    }

    /// Headline numbers: revenue, sale counts, average ticket, entity
    /// counts and how many products sit below their minimum stock.
    pub async fn metrics(&self) -> DashboardMetrics {
        simulate_latency(self.latency).await;
        let data = self.store.read().await;

        let mut total_revenue = Money::zero();
        let mut completed_sales = 0u32;
        let mut pending_sales = 0u32;
        for sale in &data.sales {
            match sale.status {
                SaleStatus::Completed => {
                    total_revenue = total_revenue + sale.total;
                    completed_sales += 1;
                }
                SaleStatus::Pending => pending_sales += 1,
                SaleStatus::Canceled => {}
            }
        }

        let average_ticket = if completed_sales == 0 {
            Money::zero()
        } else {
            Money::from_cents(total_revenue.cents() / i64::from(completed_sales))
        };

        let low_stock_count = data
            .products
            .iter()
            .filter(|p| p.is_below_min_stock())
            .count() as u32;

        DashboardMetrics {
            total_revenue,
            completed_sales,
            pending_sales,
            average_ticket,
            customer_count: data.customers.len() as u32,
            product_count: data.products.len() as u32,
            low_stock_count,
        }
    }

    /// The most recent sales by business date, newest first.
    pub async fn recent_sales(&self, limit: usize) -> Vec<Sale> {
        simulate_latency(self.latency).await;
        let data = self.store.read().await;

        let mut sales = data.sales.clone();
        sales.sort_by(|a, b| b.date.cmp(&a.date));
        sales.truncate(limit);
        sales
    }

    /// Stock-tracked products below their minimum, most urgent first.
    pub async fn low_stock_products(&self) -> Vec<Product> {
        simulate_latency(self.latency).await;
        let data = self.store.read().await;

        let mut products: Vec<Product> = data
            .products
            .iter()
            .filter(|p| p.is_below_min_stock())
            .cloned()
            .collect();
        products.sort_by_key(|p| p.stock.unwrap_or(0));
        products
    }

    /// Best sellers across completed sales, ranked by revenue.
    ///
    /// Built from item snapshots, so deleted products keep their place in
    /// the ranking.
    pub async fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        simulate_latency(self.latency).await;
        let data = self.store.read().await;

        let mut rows: HashMap<String, TopProduct> = HashMap::new();
        for sale in data.sales.iter().filter(|s| s.status == SaleStatus::Completed) {
            for item in &sale.items {
                let row = rows
                    .entry(item.product.id.clone())
                    .or_insert_with(|| TopProduct {
                        product_id: item.product.id.clone(),
                        name: item.product.name.clone(),
                        quantity: 0,
                        revenue: Money::zero(),
                    });
                row.quantity += item.quantity;
                row.revenue = row.revenue + item.total;
            }
        }

        let mut ranking: Vec<TopProduct> = rows.into_values().collect();
        ranking.sort_by(|a, b| {
            b.revenue
                .cmp(&a.revenue)
                .then(b.quantity.cmp(&a.quantity))
                .then_with(|| a.name.cmp(&b.name))
        });
        ranking.truncate(limit);
        ranking
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
