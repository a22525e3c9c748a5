//! # Customers State
//!
//! Caches the customer list for the customers screen and keeps it in sync
//! with every write that goes through the container.
//!
//! ## Thread Safety
//! The snapshot is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple UI events may read/refresh the container concurrently
//! 2. Only one event should patch the cache at a time
//! 3. The lock is never held across an `await` — status flips in, the
//!    service call runs unlocked, the result folds back in
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Customers Container Operations                      │
//! │                                                                         │
//! │  UI Action              Container Call          Cache Change            │
//! │  ─────────              ──────────────          ────────────            │
//! │                                                                         │
//! │  Open list ────────────► fetch_list() ────────► customers = page.data  │
//! │                                                                         │
//! │  Open detail ──────────► fetch_one() ─────────► current = Some(c)      │
//! │                                                                         │
//! │  Save new ─────────────► create() ────────────► customers.insert(0, c) │
//! │                                                                         │
//! │  Save edits ───────────► update() ────────────► customers[i] = c       │
//! │                                                                         │
//! │  Remove ───────────────► delete() ────────────► customers.retain(..)   │
//! │                                                                         │
//! │  NOTE: Writes only fold into the cache after the backend confirms       │
//! │        them. A failed save flips `saving` to Rejected and records       │
//! │        the backend's message in `error`; the cache stays untouched.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use balcao_backend::{BackendResult, CustomerService};
use balcao_core::{
    CreateCustomerRequest, Customer, CustomerType, ListCustomersQuery, Pagination,
    UpdateCustomerRequest,
};

use crate::status::LoadingStatus;

/// Everything the customers screen binds to, in one cloneable value.
///
/// ## Design Notes
/// - `customers`: the last fetched page, patched in place by writes
/// - `last_query`: the filters that produced it, so a screen can re-run
///   the same query after a mutation
/// - `loading` / `saving`: independent, so a save doesn't blank the table
/// - `error`: the backend's message for the last failed call, in the
///   wording the operator should see
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersSnapshot {
    /// Current page of the customer list.
    pub customers: Vec<Customer>,

    /// Customer open in the detail view, if any.
    pub current: Option<Customer>,

    /// Pagination of the last fetched page.
    pub pagination: Option<Pagination>,

    /// Query that produced the cached page.
    pub last_query: ListCustomersQuery,

    /// Status of the last read (list/get).
    pub loading: LoadingStatus,

    /// Status of the last write (create/update/delete).
    pub saving: LoadingStatus,

    /// Message of the last failed call, cleared when a new one starts.
    pub error: Option<String>,
}

/// Shared customers container.
///
/// Holds the service it refreshes through plus the cached snapshot. Cloning
/// is cheap and every clone sees the same cache.
#[derive(Debug, Clone)]
pub struct CustomersState {
    service: CustomerService,
    inner: Arc<Mutex<CustomersSnapshot>>,
}

impl CustomersState {
    /// Creates an empty container over the given service.
    pub fn new(service: CustomerService) -> Self {
        CustomersState {
            service,
            inner: Arc::new(Mutex::new(CustomersSnapshot::default())),
        }
    }

    /// Executes a function with read access to the snapshot.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let names: Vec<String> =
    ///     state.with_state(|s| s.customers.iter().map(|c| c.name.clone()).collect());
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CustomersSnapshot) -> R,
    {
        let snapshot = self.inner.lock().expect("Customers mutex poisoned");
        f(&snapshot)
    }

    /// Returns a full copy of the snapshot.
    pub fn snapshot(&self) -> CustomersSnapshot {
        self.with_state(CustomersSnapshot::clone)
    }

    fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CustomersSnapshot) -> R,
    {
        let mut snapshot = self.inner.lock().expect("Customers mutex poisoned");
        f(&mut snapshot)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches one page of customers and replaces the cached list.
    pub async fn fetch_list(&self, query: ListCustomersQuery) {
        self.with_state_mut(|s| {
            s.loading = LoadingStatus::Pending;
            s.error = None;
        });

        let page = self.service.list(&query).await;
        debug!(total = page.pagination.total, "Customer list refreshed");

        self.with_state_mut(|s| {
            s.customers = page.data;
            s.pagination = Some(page.pagination);
            s.last_query = query;
            s.loading = LoadingStatus::Fulfilled;
        });
    }

    /// Fetches one customer into the detail slot.
    pub async fn fetch_one(&self, id: &str) -> BackendResult<Customer> {
        self.with_state_mut(|s| {
            s.loading = LoadingStatus::Pending;
            s.error = None;
        });

        match self.service.get(id).await {
            Ok(customer) => {
                self.with_state_mut(|s| {
                    s.current = Some(customer.clone());
                    s.loading = LoadingStatus::Fulfilled;
                });
                Ok(customer)
            }
            Err(err) => {
                warn!(id = %id, error = %err, "Customer fetch failed");
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

    /// Creates a customer and folds it into the cached list.
    ///
    /// The new record is prepended only when a list has already been
    /// fetched; an untouched cache stays empty so the first `fetch_list`
    /// paints the real page.
    pub async fn create(&self, request: CreateCustomerRequest) -> BackendResult<Customer> {
        self.begin_save();
        let result = self.service.create(request).await;
        self.finish_save(result, |s, customer| {
            if s.loading.is_fulfilled() {
                s.customers.insert(0, customer.clone());
            }
        })
    }

    /// Updates a customer, patching both the list row and the detail slot.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateCustomerRequest,
    ) -> BackendResult<Customer> {
        self.begin_save();
        let result = self.service.update(id, request).await;
        self.finish_save(result, patch_cached)
    }

    /// Flips the active flag, patching the cache like an update.
    pub async fn set_active(&self, id: &str, is_active: bool) -> BackendResult<Customer> {
        self.begin_save();
        let result = self.service.set_active(id, is_active).await;
        self.finish_save(result, patch_cached)
    }

    /// Deletes a customer and drops it from the cache.
    pub async fn delete(&self, id: &str) -> BackendResult<Customer> {
        self.begin_save();
        let result = self.service.delete(id).await;
        self.finish_save(result, |s, customer| {
            s.customers.retain(|c| c.id != customer.id);
            if s.current.as_ref().is_some_and(|c| c.id == customer.id) {
                s.current = None;
            }
        })
    }

    /// Checks whether a document is already registered, for form feedback.
    ///
    /// Pass the customer's own id on edit screens so its current document
    /// doesn't read as a duplicate.
    pub async fn check_document(&self, document: &str, exclude_id: Option<&str>) -> bool {
        self.service.document_exists(document, exclude_id).await
    }

    fn begin_save(&self) {
        self.with_state_mut(|s| {
            s.saving = LoadingStatus::Pending;
            s.error = None;
        });
    }

    fn finish_save<F>(&self, result: BackendResult<Customer>, apply: F) -> BackendResult<Customer>
    where
        F: FnOnce(&mut CustomersSnapshot, &Customer),
    {
        match result {
            Ok(customer) => {
                self.with_state_mut(|s| {
                    apply(s, &customer);
                    s.saving = LoadingStatus::Fulfilled;
                });
                Ok(customer)
            }
            Err(err) => {
                warn!(error = %err, "Customer save failed");
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

    /// Active customers from the cached page, for pickers.
    pub fn active(&self) -> Vec<Customer> {
        self.with_state(|s| s.customers.iter().filter(|c| c.is_active).cloned().collect())
    }

    /// Cached customers of one type.
    pub fn by_type(&self, customer_type: CustomerType) -> Vec<Customer> {
        self.with_state(|s| {
            s.customers
                .iter()
                .filter(|c| c.customer_type == customer_type)
                .cloned()
                .collect()
        })
    }
}

/// Replaces the saved record wherever the cache holds it.
fn patch_cached(s: &mut CustomersSnapshot, customer: &Customer) {
    if let Some(slot) = s.customers.iter_mut().find(|c| c.id == customer.id) {
        *slot = customer.clone();
    }
    if s.current.as_ref().is_some_and(|c| c.id == customer.id) {
        s.current = Some(customer.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_backend::{Backend, BackendConfig};

    fn state() -> CustomersState {
        let backend = Backend::new(BackendConfig::instant());
        CustomersState::new(backend.customers())
    }

    fn create_request(name: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: name.to_string(),
            customer_type: CustomerType::Physical,
            document: None,
            email: None,
            phone: None,
            notes: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_leaves_unfetched_cache_empty() {
        let state = state();

        state.create(create_request("Ana Souza")).await.unwrap();

        let snapshot = state.snapshot();
        assert!(snapshot.customers.is_empty());
        assert!(snapshot.saving.is_fulfilled());

        state.fetch_list(ListCustomersQuery::default()).await;
        assert_eq!(state.snapshot().customers.len(), 1);
    }

    #[tokio::test]
    async fn test_create_prepends_after_fetch() {
        let state = state();
        state.fetch_list(ListCustomersQuery::default()).await;

        state.create(create_request("Ana Souza")).await.unwrap();
        state.create(create_request("Bruno Lima")).await.unwrap();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.customers.len(), 2);
        assert_eq!(snapshot.customers[0].name, "Bruno Lima");
        assert!(snapshot.loading.is_fulfilled());
    }

    #[tokio::test]
    async fn test_update_patches_list_and_current() {
        let state = state();
        state.fetch_list(ListCustomersQuery::default()).await;
        let created = state.create(create_request("Ana Souza")).await.unwrap();
        state.fetch_one(&created.id).await.unwrap();

        let request = UpdateCustomerRequest {
            name: Some("Ana Souza Oliveira".to_string()),
            ..UpdateCustomerRequest::default()
        };
        state.update(&created.id, request).await.unwrap();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.customers[0].name, "Ana Souza Oliveira");
        assert_eq!(snapshot.current.unwrap().name, "Ana Souza Oliveira");
    }

    #[tokio::test]
    async fn test_delete_drops_row_and_clears_current() {
        let state = state();
        state.fetch_list(ListCustomersQuery::default()).await;
        let created = state.create(create_request("Ana Souza")).await.unwrap();
        state.fetch_one(&created.id).await.unwrap();

        state.delete(&created.id).await.unwrap();

        let snapshot = state.snapshot();
        assert!(snapshot.customers.is_empty());
        assert!(snapshot.current.is_none());
    }

    #[tokio::test]
    async fn test_failed_save_records_error_and_keeps_cache() {
        let state = state();
        state.fetch_list(ListCustomersQuery::default()).await;
        state.create(create_request("Ana Souza")).await.unwrap();

        let result = state.create(create_request("   ")).await;

        assert!(result.is_err());
        let snapshot = state.snapshot();
        assert_eq!(snapshot.customers.len(), 1);
        assert!(snapshot.saving.is_rejected());
        assert_eq!(snapshot.error.as_deref(), Some("nome é obrigatório"));
    }

    #[tokio::test]
    async fn test_fetch_one_missing_sets_rejected() {
        let state = state();

        let result = state.fetch_one("nope").await;

        assert!(result.is_err());
        let snapshot = state.snapshot();
        assert!(snapshot.loading.is_rejected());
        assert_eq!(snapshot.error.as_deref(), Some("Cliente não encontrado"));
    }

    #[tokio::test]
    async fn test_derived_filters_read_the_cache() {
        let state = state();
        state.fetch_list(ListCustomersQuery::default()).await;
        let ana = state.create(create_request("Ana Souza")).await.unwrap();
        state.create(create_request("Bruno Lima")).await.unwrap();

        state.set_active(&ana.id, false).await.unwrap();

        let active = state.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Bruno Lima");
        assert_eq!(state.by_type(CustomerType::Physical).len(), 2);
        assert!(state.by_type(CustomerType::Legal).is_empty());
    }
}
