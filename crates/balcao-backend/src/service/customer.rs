//! # Customer Service
//!
//! Operations on the customer registry.
//!
//! ## Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_name ──► validate_notes ──► validate_customer_document        │
//! │       │                                     │                           │
//! │       │              fisica → CPF check digits                          │
//! │       │              juridica → CNPJ check digits                       │
//! │       ▼                                                                 │
//! │  store write (only reached when everything passed)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use balcao_core::validation::{validate_customer_document, validate_name, validate_notes};
use balcao_core::{
    CreateCustomerRequest, Customer, ListCustomersQuery, PaginatedResponse, UpdateCustomerRequest,
};

use crate::error::{BackendError, BackendResult, Entity};
use crate::repository::customer::CustomerRepository;
use crate::service::{blank_to_none, simulate_latency};
use crate::store::MemoryStore;

/// Service exposing the customer operations.
#[derive(Debug, Clone)]
pub struct CustomerService {
    repository: CustomerRepository,
    latency: Duration,
}

impl CustomerService {
    /// Creates a new CustomerService.
    pub fn new(store: MemoryStore, latency: Duration) -> Self {
        CustomerService {
            repository: CustomerRepository::new(store),
            latency,
        }
    }

    /// Lists customers matching the query.
    pub async fn list(&self, query: &ListCustomersQuery) -> PaginatedResponse<Customer> {
        simulate_latency(self.latency).await;
        self.repository.list(query).await
    }

    /// Gets a customer by id.
    pub async fn get(&self, id: &str) -> BackendResult<Customer> {
        simulate_latency(self.latency).await;
        self.repository
            .get(id)
            .await
            .ok_or_else(|| BackendError::not_found(Entity::Customer, id))
    }

    /// Registers a new customer.
    ///
    /// ## What This Does
    /// 1. Validates name, notes and the fiscal document (when provided,
    ///    against the customer type: CPF for fisica, CNPJ for juridica)
    /// 2. Assigns a fresh id and timestamps
    /// 3. Inserts into the store (`isActive` defaults to true)
    pub async fn create(&self, request: CreateCustomerRequest) -> BackendResult<Customer> {
        simulate_latency(self.latency).await;

        validate_name(&request.name)?;
        if let Some(notes) = request.notes.as_deref() {
            validate_notes(notes)?;
        }
        if let Some(document) = request.document.as_deref() {
            validate_customer_document(request.customer_type.document_kind(), document)?;
        }

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            customer_type: request.customer_type,
            document: request.document.and_then(blank_to_none),
            email: request.email.and_then(blank_to_none),
            phone: request.phone.and_then(blank_to_none),
            notes: request.notes.and_then(blank_to_none),
            is_active: request.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %customer.id, name = %customer.name, "Creating customer");
        Ok(self.repository.insert(customer).await)
    }

    /// Applies a partial update to a customer.
    ///
    /// Absent fields keep their current value; a blank string clears an
    /// optional field. The merged result is validated as a whole, so
    /// switching the customer type without sending a matching document
    /// fails instead of leaving a CPF on a juridica record.
    pub async fn update(&self, id: &str, request: UpdateCustomerRequest) -> BackendResult<Customer> {
        simulate_latency(self.latency).await;

        let mut customer = self
            .repository
            .get(id)
            .await
            .ok_or_else(|| BackendError::not_found(Entity::Customer, id))?;

        if let Some(name) = request.name {
            customer.name = name;
        }
        if let Some(customer_type) = request.customer_type {
            customer.customer_type = customer_type;
        }
        if let Some(document) = request.document {
            customer.document = blank_to_none(document);
        }
        if let Some(email) = request.email {
            customer.email = blank_to_none(email);
        }
        if let Some(phone) = request.phone {
            customer.phone = blank_to_none(phone);
        }
        if let Some(notes) = request.notes {
            customer.notes = blank_to_none(notes);
        }
        if let Some(is_active) = request.is_active {
            customer.is_active = is_active;
        }

        validate_name(&customer.name)?;
        if let Some(notes) = customer.notes.as_deref() {
            validate_notes(notes)?;
        }
        if let Some(document) = customer.document.as_deref() {
            validate_customer_document(customer.document_kind(), document)?;
        }

        customer.updated_at = Utc::now();
        self.repository.save(customer).await
    }

    /// Removes a customer.
    ///
    /// Sales keep their customer snapshot, so history is unaffected.
    pub async fn delete(&self, id: &str) -> BackendResult<Customer> {
        simulate_latency(self.latency).await;
        self.repository.delete(id).await
    }

    /// Activates or deactivates a customer.
    pub async fn set_active(&self, id: &str, is_active: bool) -> BackendResult<Customer> {
        simulate_latency(self.latency).await;

        let mut customer = self
            .repository
            .get(id)
            .await
            .ok_or_else(|| BackendError::not_found(Entity::Customer, id))?;

        debug!(id = %id, is_active, "Toggling customer activation");
        customer.is_active = is_active;
        customer.updated_at = Utc::now();
        self.repository.save(customer).await
    }

    /// Checks whether a fiscal document is already registered.
    ///
    /// Comparison ignores formatting: `123.456.789-00` and `12345678900`
    /// are the same document. `exclude_id` skips the customer being edited.
    pub async fn document_exists(&self, document: &str, exclude_id: Option<&str>) -> bool {
        simulate_latency(self.latency).await;
        self.repository.document_exists(document, exclude_id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
