//! # Sale Repository
//!
//! Read-side store operations for sales: listing and lookup.
//!
//! There are no insert/save/delete methods here. Every sale mutation
//! touches the product collection as well (reserving or restoring stock
//! and recording movements), so the whole write path lives in
//! `SaleService` under a single write guard.

use balcao_core::{ListSalesQuery, PaginatedResponse, Sale};

use crate::store::MemoryStore;

/// Repository for sale lookups.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    store: MemoryStore,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(store: MemoryStore) -> Self {
        SaleRepository { store }
    }

    /// Lists sales through the filter → sort → paginate pipeline.
    pub async fn list(&self, query: &ListSalesQuery) -> PaginatedResponse<Sale> {
        let data = self.store.read().await;
        query.apply(data.sales.clone())
    }

    /// Gets a sale by id.
    pub async fn get(&self, id: &str) -> Option<Sale> {
        let data = self.store.read().await;
        data.sale(id).cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_sales_are_listed_newest_first() {
        let repo = SaleRepository::new(MemoryStore::with_demo_data());
        let page = repo.list(&ListSalesQuery::default()).await;

        assert_eq!(page.pagination.total, 5);
        let dates: Vec<_> = page.data.iter().map(|s| s.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let repo = SaleRepository::new(MemoryStore::with_demo_data());
        let page = repo.list(&ListSalesQuery::default()).await;
        let id = page.data[0].id.clone();

        let sale = repo.get(&id).await.unwrap();
        assert_eq!(sale.id, id);
        assert!(repo.get("missing").await.is_none());
    }
}
