//! # Customer Repository
//!
//! Store operations for customers.

use tracing::debug;

use balcao_core::document::digits;
use balcao_core::{Customer, ListCustomersQuery, PaginatedResponse};

use crate::error::{BackendError, BackendResult, Entity};
use crate::store::MemoryStore;

/// Repository for customer store operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(store.clone());
/// let page = repo.list(&ListCustomersQuery::default()).await;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    store: MemoryStore,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(store: MemoryStore) -> Self {
        CustomerRepository { store }
    }

    /// Lists customers through the filter → sort → paginate pipeline.
    pub async fn list(&self, query: &ListCustomersQuery) -> PaginatedResponse<Customer> {
        let data = self.store.read().await;
        query.apply(data.customers.clone())
    }

    /// Gets a customer by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `None` - No such id
    pub async fn get(&self, id: &str) -> Option<Customer> {
        let data = self.store.read().await;
        data.customer(id).cloned()
    }

    /// Inserts a new customer.
    pub async fn insert(&self, customer: Customer) -> Customer {
        debug!(id = %customer.id, "Inserting customer");
        let mut data = self.store.write().await;
        data.customers.push(customer.clone());
        customer
    }

    /// Replaces an existing customer by id.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The stored version
    /// * `Err(BackendError::NotFound)` - Customer doesn't exist
    pub async fn save(&self, customer: Customer) -> BackendResult<Customer> {
        debug!(id = %customer.id, "Updating customer");
        let mut data = self.store.write().await;
        match data.customer_mut(&customer.id) {
            Some(stored) => {
                *stored = customer.clone();
                Ok(customer)
            }
            None => Err(BackendError::not_found(Entity::Customer, customer.id)),
        }
    }

    /// Removes a customer by id, returning the removed entity.
    pub async fn delete(&self, id: &str) -> BackendResult<Customer> {
        debug!(id = %id, "Deleting customer");
        let mut data = self.store.write().await;
        match data.customers.iter().position(|c| c.id == id) {
            Some(index) => Ok(data.customers.remove(index)),
            None => Err(BackendError::not_found(Entity::Customer, id)),
        }
    }

    /// Checks whether a document is already registered.
    ///
    /// Comparison ignores formatting: "123.456.789-00" and "12345678900"
    /// are the same document. `exclude_id` skips the customer being edited
    /// so a form does not collide with its own record.
    pub async fn document_exists(&self, document: &str, exclude_id: Option<&str>) -> bool {
        let wanted = digits(document);
        if wanted.is_empty() {
            return false;
        }
        let data = self.store.read().await;
        data.customers.iter().any(|c| {
            exclude_id != Some(c.id.as_str())
                && c.document.as_deref().map(digits) == Some(wanted.clone())
        })
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

    fn customer(id: &str, name: &str, document: Option<&str>) -> Customer {
        let now = Utc::now();
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            customer_type: CustomerType::Physical,
            document: document.map(String::from),
            email: None,
            phone: None,
            notes: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn repo() -> CustomerRepository {
        CustomerRepository::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_insert_get_roundtrip() {
        let repo = repo();
        repo.insert(customer("c1", "Maria", None)).await;
        let found = repo.get("c1").await;
        assert_eq!(found.map(|c| c.name), Some("Maria".to_string()));
        assert!(repo.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_and_errors_on_missing() {
        let repo = repo();
        repo.insert(customer("c1", "Maria", None)).await;

        let mut updated = customer("c1", "Maria Silva", None);
        updated.is_active = false;
        repo.save(updated).await.unwrap();

        let stored = repo.get("c1").await.unwrap();
        assert_eq!(stored.name, "Maria Silva");
        assert!(!stored.is_active);

        let err = repo.save(customer("ghost", "x", None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Cliente não encontrado");
    }

    #[tokio::test]
    async fn test_delete_returns_the_removed_customer() {
        let repo = repo();
        repo.insert(customer("c1", "Maria", None)).await;
        let removed = repo.delete("c1").await.unwrap();
        assert_eq!(removed.id, "c1");
        assert!(repo.get("c1").await.is_none());
        assert!(repo.delete("c1").await.is_err());
    }

    #[tokio::test]
    async fn test_document_exists_ignores_formatting() {
        let repo = repo();
        repo.insert(customer("c1", "Maria", Some("111.444.777-35"))).await;

        assert!(repo.document_exists("11144477735", None).await);
        assert!(repo.document_exists("111.444.777-35", None).await);
        assert!(!repo.document_exists("11144477735", Some("c1")).await);
        assert!(!repo.document_exists("529.982.247-25", None).await);
        assert!(!repo.document_exists("", None).await);
    }
}
