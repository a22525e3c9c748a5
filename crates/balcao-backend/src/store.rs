//! # In-Memory Store
//!
//! The collections behind the mocked backend, plus the shared handle that
//! repositories and services clone.
//!
//! ## Transaction Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Lock, One Transaction                            │
//! │                                                                         │
//! │  MemoryStore (cloneable handle)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<RwLock<Collections>>                                               │
//! │       │                                                                 │
//! │       ├── read()  ──► many concurrent readers (lists, lookups)         │
//! │       │                                                                 │
//! │       └── write() ──► one writer at a time                             │
//! │                                                                         │
//! │  The write guard IS the transaction:                                   │
//! │                                                                         │
//! │  let mut data = store.write().await;                                   │
//! │  validate(&data)?;        ← nothing mutated yet                        │
//! │  data.products[i].stock -= qty;   ← only after every check passed      │
//! │  data.sales.insert(0, sale);                                            │
//! │  // guard drops here; readers see before or after, never between       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All collections sit behind a single lock because the sale workflow
//! touches three of them at once (sales, products, stock movements). Per
//! collection locks would re-open the check-then-decrement race this
//! design exists to close.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use balcao_core::{Customer, Product, Sale, StockMovement};

use crate::seed;

// =============================================================================
// Collections
// =============================================================================

/// The collections behind the mocked backend.
///
/// Insertion order is meaningful: list endpoints preserve it whenever no
/// sort is requested, and new sales are prepended so the sales screen
/// shows the latest first.
#[derive(Debug, Default)]
pub struct Collections {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub stock_movements: Vec<StockMovement>,
    /// Monotonic counter backing sale code generation. Never decremented,
    /// so deleting a sale cannot make a code repeat.
    sale_sequence: u64,
}

impl Collections {
    /// Looks up a customer by id.
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Looks up a customer by id, mutably.
    pub fn customer_mut(&mut self, id: &str) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id == id)
    }

    /// Looks up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by id, mutably.
    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Looks up a sale by id.
    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Looks up a sale by id, mutably.
    pub fn sale_mut(&mut self, id: &str) -> Option<&mut Sale> {
        self.sales.iter_mut().find(|s| s.id == id)
    }

    /// Issues the next sale display code: "VND-001", "VND-002", ...
    pub fn next_sale_code(&mut self) -> String {
        self.sale_sequence += 1;
        format!("VND-{:03}", self.sale_sequence)
    }

    /// Aligns the code sequence with pre-seeded sales.
    pub(crate) fn set_sale_sequence(&mut self, value: u64) {
        self.sale_sequence = value;
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Shared handle over the backend collections.
///
/// Clone freely: every clone points at the same data, the same way every
/// repository in a database-backed app shares one pool.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Creates an empty store. Tests start here for full isolation.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-loaded with the demo dataset.
    pub fn with_demo_data() -> Self {
        MemoryStore {
            inner: Arc::new(RwLock::new(seed::demo_collections())),
        }
    }

    /// Acquires shared read access.
    pub async fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().await
    }

    /// Acquires exclusive write access. Hold the guard for the whole
    /// read-validate-mutate sequence.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_core::CustomerType;
    use chrono::Utc;

    fn customer(id: &str, name: &str) -> Customer {
        let now = Utc::now();
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            customer_type: CustomerType::Physical,
            document: None,
            email: None,
            phone: None,
            notes: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sale_codes_never_repeat() {
        let mut data = Collections::default();
        assert_eq!(data.next_sale_code(), "VND-001");
        assert_eq!(data.next_sale_code(), "VND-002");
        // Deleting sales does not rewind the sequence.
        data.sales.clear();
        assert_eq!(data.next_sale_code(), "VND-003");
    }

    #[test]
    fn test_lookup_helpers() {
        let mut data = Collections::default();
        data.customers.push(customer("c1", "Maria"));
        assert_eq!(data.customer("c1").map(|c| c.name.as_str()), Some("Maria"));
        assert!(data.customer("missing").is_none());

        if let Some(found) = data.customer_mut("c1") {
            found.name = "Maria Silva".to_string();
        }
        assert_eq!(
            data.customer("c1").map(|c| c.name.as_str()),
            Some("Maria Silva")
        );
    }

    #[tokio::test]
    async fn test_clones_share_the_same_data() {
        let store = MemoryStore::new();
        let clone = store.clone();

        clone.write().await.customers.push(customer("c1", "João"));

        let data = store.read().await;
        assert_eq!(data.customers.len(), 1);
        assert_eq!(data.customers[0].name, "João");
    }

    #[tokio::test]
    async fn test_demo_store_is_populated() {
        let store = MemoryStore::with_demo_data();
        let data = store.read().await;
        assert!(!data.customers.is_empty());
        assert!(!data.products.is_empty());
        assert!(!data.sales.is_empty());
    }
}
