//! # Product Repository
//!
//! Store operations for the product catalog.
//!
//! Stock balances are deliberately not mutated here: every stock change
//! goes through the service layer, which pairs the balance update with a
//! movement record under a single write guard.

use tracing::debug;

use balcao_core::{ListProductsQuery, PaginatedResponse, Product, StockMovement};

use crate::error::{BackendError, BackendResult, Entity};
use crate::store::MemoryStore;

/// Repository for product store operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: MemoryStore,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(store: MemoryStore) -> Self {
        ProductRepository { store }
    }

    /// Lists products through the filter → sort → paginate pipeline.
    pub async fn list(&self, query: &ListProductsQuery) -> PaginatedResponse<Product> {
        let data = self.store.read().await;
        query.apply(data.products.clone())
    }

    /// Gets a product by id.
    pub async fn get(&self, id: &str) -> Option<Product> {
        let data = self.store.read().await;
        data.product(id).cloned()
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: Product) -> Product {
        debug!(id = %product.id, sku = %product.sku, "Inserting product");
        let mut data = self.store.write().await;
        data.products.push(product.clone());
        product
    }

    /// Replaces an existing product by id.
    pub async fn save(&self, product: Product) -> BackendResult<Product> {
        debug!(id = %product.id, "Updating product");
        let mut data = self.store.write().await;
        match data.product_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(product)
            }
            None => Err(BackendError::not_found(Entity::Product, product.id)),
        }
    }

    /// Removes a product by id, returning the removed entity.
    ///
    /// Past sales keep their snapshots, so deletion does not rewrite any
    /// sale history.
    pub async fn delete(&self, id: &str) -> BackendResult<Product> {
        debug!(id = %id, "Deleting product");
        let mut data = self.store.write().await;
        match data.products.iter().position(|p| p.id == id) {
            Some(index) => Ok(data.products.remove(index)),
            None => Err(BackendError::not_found(Entity::Product, id)),
        }
    }

    /// Checks whether a SKU is already taken.
    ///
    /// Case-insensitive: `mouse001` and `MOUSE001` are the same SKU.
    /// `exclude_id` skips the product being edited.
    pub async fn sku_exists(&self, sku: &str, exclude_id: Option<&str>) -> bool {
        if sku.trim().is_empty() {
            return false;
        }
        let data = self.store.read().await;
        data.products
            .iter()
            .any(|p| exclude_id != Some(p.id.as_str()) && p.sku.eq_ignore_ascii_case(sku))
    }

    /// Stock movement history for one product, newest first.
    pub async fn movements(&self, product_id: &str) -> Vec<StockMovement> {
        let data = self.store.read().await;
        data.stock_movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .rev()
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_core::{Money, ProductType};
    use chrono::Utc;

    fn product(id: &str, sku: &str, price_cents: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            sku: sku.to_string(),
            name: format!("Produto {sku}"),
            description: None,
            product_type: ProductType::Product,
            price: Money::from_cents(price_cents),
            cost_price: None,
            stock: Some(10),
            min_stock: None,
            unit: Some("un".to_string()),
            brand: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn repo() -> ProductRepository {
        ProductRepository::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let repo = repo();
        repo.insert(product("p1", "MOUSE001", 14_999)).await;

        let mut updated = product("p1", "MOUSE001", 12_999);
        updated.stock = Some(25);
        repo.save(updated).await.unwrap();

        let stored = repo.get("p1").await.unwrap();
        assert_eq!(stored.price, Money::from_cents(12_999));
        assert_eq!(stored.stock, Some(25));

        let removed = repo.delete("p1").await.unwrap();
        assert_eq!(removed.sku, "MOUSE001");
        assert!(repo.get("p1").await.is_none());
    }

    #[tokio::test]
    async fn test_save_missing_product_is_not_found() {
        let err = repo().save(product("ghost", "X", 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Produto não encontrado");
    }

    #[tokio::test]
    async fn test_sku_probe() {
        let repo = repo();
        repo.insert(product("p1", "MOUSE001", 14_999)).await;

        assert!(repo.sku_exists("MOUSE001", None).await);
        assert!(repo.sku_exists("mouse001", None).await);
        assert!(!repo.sku_exists("MOUSE001", Some("p1")).await);
        assert!(!repo.sku_exists("TEC001", None).await);
        assert!(!repo.sku_exists("", None).await);
    }
}
