//! Customer entity, request payloads and list query.
//!
//! A customer is either a pessoa física (individual, CPF) or a pessoa
//! jurídica (company, CNPJ). The `document` field is optional — walk-in
//! customers are often registered with just a name — but when present it
//! must pass the check-digit validation in [`crate::document`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::document::DocumentKind;
use crate::query::{self, PaginatedResponse, SortDirection};

// =============================================================================
// Customer Type
// =============================================================================

/// Legal nature of a customer.
///
/// Decides which document kind applies: física carries a CPF, jurídica a
/// CNPJ. Serialized with the Portuguese wire values the UI expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CustomerType {
    /// Pessoa física — an individual.
    #[serde(rename = "fisica")]
    Physical,
    /// Pessoa jurídica — a company.
    #[serde(rename = "juridica")]
    Legal,
}

impl CustomerType {
    /// The document kind this customer type carries.
    #[inline]
    pub fn document_kind(self) -> DocumentKind {
        match self {
            CustomerType::Physical => DocumentKind::Cpf,
            CustomerType::Legal => DocumentKind::Cnpj,
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: String,
    /// Display name (pessoa física) or razão social (pessoa jurídica).
    pub name: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    /// CPF or CNPJ, stored as entered (digits or formatted).
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    /// Inactive customers are kept for history but hidden from pickers.
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// The document kind this customer's `document` must validate against.
    #[inline]
    pub fn document_kind(&self) -> DocumentKind {
        self.customer_type.document_kind()
    }
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Payload for registering a new customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateCustomerRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    /// Defaults to `true` when omitted.
    pub is_active: Option<bool>,
}

/// Partial update for an existing customer. Absent fields keep their
/// current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: Option<CustomerType>,
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

// =============================================================================
// List Query
// =============================================================================

/// Sortable columns of the customer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CustomerSortField {
    Name,
    Email,
    CreatedAt,
}

impl CustomerSortField {
    fn compare(self, a: &Customer, b: &Customer) -> std::cmp::Ordering {
        match self {
            CustomerSortField::Name => query::cmp_ci(&a.name, &b.name),
            CustomerSortField::Email => {
                query::cmp_ci_opt(a.email.as_deref(), b.email.as_deref())
            }
            CustomerSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Query parameters of the customer list endpoint.
///
/// Every field is independent: all present filters must match for a record
/// to survive. `search` looks case-insensitively at name and email.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ListCustomersQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: Option<CustomerType>,
    pub is_active: Option<bool>,
    pub sort: Option<CustomerSortField>,
    pub order: SortDirection,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListCustomersQuery {
    /// Runs the filter → sort → paginate pipeline over the full collection.
    ///
    /// Pagination is applied last, so `pagination.total` counts the filtered
    /// set, not the whole table. The sort is stable: records that compare
    /// equal keep their insertion order.
    pub fn apply(&self, customers: Vec<Customer>) -> PaginatedResponse<Customer> {
        let mut filtered: Vec<Customer> =
            customers.into_iter().filter(|c| self.matches(c)).collect();

        if let Some(field) = self.sort {
            filtered.sort_by(|a, b| self.order.apply(field.compare(a, b)));
        }

        query::paginate(filtered, self.page, self.limit)
    }

    fn matches(&self, customer: &Customer) -> bool {
        if let Some(search) = self.search.as_deref() {
            let fields = [Some(customer.name.as_str()), customer.email.as_deref()];
            if !search.is_empty() && !query::matches_search(fields, search) {
                return false;
            }
        }
        if let Some(customer_type) = self.customer_type {
            if customer.customer_type != customer_type {
                return false;
            }
        }
        if let Some(is_active) = self.is_active {
            if customer.is_active != is_active {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
