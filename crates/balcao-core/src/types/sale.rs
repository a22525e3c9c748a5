//! Sale types: the aggregate, its line items and the request payloads.
//!
//! ## Sale Workflow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        CREATE SALE                              │
//! │                                                                 │
//! │  CreateSaleRequest                                              │
//! │        │                                                        │
//! │        ▼                                                        │
//! │  validate customer ──► validate items ──► check stock           │
//! │        │                                      │                 │
//! │        │              any failure ◄───────────┘                 │
//! │        │              (nothing is written)                      │
//! │        ▼                                                        │
//! │  snapshot customer + products ──► compute totals ──► debit      │
//! │        │                                             stock      │
//! │        ▼                                                        │
//! │  Sale { code: "VND-042", status: concluida, ... }               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//!
//! A sale freezes the customer and product data it was made with. Renaming
//! a product or deleting a customer later must not rewrite history, so the
//! aggregate stores [`CustomerSnapshot`]/[`ProductSnapshot`] copies instead
//! of live references.
//!
//! ## Totals
//!
//! Each line: `quantity × price − item discount` (may go negative on
//! purpose, an over-discounted line is visible in reports). The sale:
//! `subtotal − sale discount`, floored at zero so a generous discount can
//! never produce a negative charge.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::query::{self, PaginatedResponse, SortDirection};

// =============================================================================
// Status & Payment
// =============================================================================

/// Lifecycle state of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SaleStatus {
    /// Recorded but not finished. Nothing moves stock yet.
    #[serde(rename = "pendente")]
    Pending,
    /// Finished sale; stock has been debited.
    #[serde(rename = "concluida")]
    Completed,
    /// Reversed sale; stock has been restored. Terminal.
    #[serde(rename = "cancelada")]
    Canceled,
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    /// Cash. Kept as "money" on the wire, the value the UI has always sent.
    #[serde(rename = "money")]
    Cash,
    BankTransfer,
    Pix,
    Boleto,
}

// =============================================================================
// Snapshots
// =============================================================================

/// Customer data frozen into a sale at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerSnapshot {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// Product data frozen into a sale item at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Sale
// =============================================================================

/// A line item in a sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    pub id: String,
    /// Product at time of sale (frozen).
    pub product: ProductSnapshot,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub price: Money,
    /// Discount applied to this line.
    pub discount: Money,
    pub notes: String,
    /// quantity × price − discount. Not floored: negative lines are kept.
    pub total: Money,
}

/// A sale aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// Sequential display code: "VND-001", "VND-002", ...
    pub code: String,
    /// Business date of the sale, chosen by the operator.
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub customer: CustomerSnapshot,
    pub items: Vec<SaleItem>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Discount over the whole sale, on top of line discounts.
    pub discount: Money,
    /// subtotal − discount, floored at zero.
    pub total: Money,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
    pub notes: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    /// Canceled sales are frozen; everything else can still be edited.
    #[inline]
    pub fn can_edit(&self) -> bool {
        self.status != SaleStatus::Canceled
    }

    /// A sale can be canceled once, and only once.
    #[inline]
    pub fn can_cancel(&self) -> bool {
        self.status != SaleStatus::Canceled
    }
}

// =============================================================================
// Request Payloads
// =============================================================================

/// One line of a sale being created or edited.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItemRequest {
    /// Kept when editing an existing line; generated when absent.
    pub id: Option<String>,
    pub product_id: String,
    pub quantity: i64,
    pub price: Money,
    pub discount: Option<Money>,
    pub notes: Option<String>,
}

impl SaleItemRequest {
    /// Line total: quantity × price − discount. Deliberately not floored.
    pub fn total(&self) -> Money {
        self.price.multiply_quantity(self.quantity) - self.discount.unwrap_or_default()
    }
}

/// Payload for recording a new sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateSaleRequest {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub customer_id: String,
    pub items: Vec<SaleItemRequest>,
    /// Sale-level discount. Defaults to zero.
    pub discount: Option<Money>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Partial update for an existing sale. Absent fields keep their current
/// value; when `items` is present the whole item list is replaced and
/// stock is rebalanced against the previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct UpdateSaleRequest {
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    pub customer_id: Option<String>,
    pub items: Option<Vec<SaleItemRequest>>,
    pub discount: Option<Money>,
    /// May move between `pendente` and `concluida`. Canceling goes through
    /// the dedicated cancel operation, never through here.
    pub status: Option<SaleStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

// =============================================================================
// List Query
// =============================================================================

/// Sortable columns of the sale list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum SaleSortField {
    Code,
    Date,
    Total,
}

impl SaleSortField {
    fn compare(self, a: &Sale, b: &Sale) -> std::cmp::Ordering {
        match self {
            SaleSortField::Code => query::cmp_ci(&a.code, &b.code),
            SaleSortField::Date => a.date.cmp(&b.date),
            SaleSortField::Total => a.total.cmp(&b.total),
        }
    }
}

/// Query parameters of the sale list endpoint.
///
/// `search` matches the display code; the date bounds are inclusive at
/// both ends. Without an explicit sort the list comes back most recent
/// first, which is what the sales screen always shows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ListSalesQuery {
    pub search: Option<String>,
    pub status: Option<SaleStatus>,
    pub customer_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    pub sort: Option<SaleSortField>,
    pub order: SortDirection,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListSalesQuery {
    /// Runs the filter → sort → paginate pipeline over the full collection.
    pub fn apply(&self, sales: Vec<Sale>) -> PaginatedResponse<Sale> {
        let mut filtered: Vec<Sale> = sales.into_iter().filter(|s| self.matches(s)).collect();

        match self.sort {
            Some(field) => filtered.sort_by(|a, b| self.order.apply(field.compare(a, b))),
            // Default ordering: most recent first.
            None => filtered.sort_by(|a, b| b.date.cmp(&a.date)),
        }

        query::paginate(filtered, self.page, self.limit)
    }

    fn matches(&self, sale: &Sale) -> bool {
        if let Some(search) = self.search.as_deref() {
            if !search.is_empty() && !query::matches_search([Some(sale.code.as_str())], search) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if sale.status != status {
                return false;
            }
        }
        if let Some(customer_id) = self.customer_id.as_deref() {
            if sale.customer.id != customer_id {
                return false;
            }
        }
        if let Some(payment_method) = self.payment_method {
            if sale.payment_method != payment_method {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if sale.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if sale.date > end {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
