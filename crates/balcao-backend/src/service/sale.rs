//! # Sale Service
//!
//! The sale workflow: recording, editing, canceling and deleting sales,
//! with stock reservation handled inside the same critical section.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update / cancel / delete                                      │
//! │                                                                         │
//! │  validate payload (pure, no lock)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.write().await ─────────────── single guard for the whole op      │
//! │       │                                                                 │
//! │  resolve customer + products                                            │
//! │  plan stock deltas (cumulative per product)                             │
//! │  check every delta against available stock                              │
//! │       │                                                                 │
//! │       ├── any check fails → return error, nothing was touched           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply deltas + append ledger movements + write the sale                │
//! │                                                                         │
//! │  (No interleaving can observe a partial decrement.)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use balcao_core::validation::{validate_discount, validate_notes, validate_price, validate_quantity};
use balcao_core::{
    CreateSaleRequest, CustomerSnapshot, ListSalesQuery, Money, PaginatedResponse, ProductSnapshot,
    Sale, SaleItem, SaleItemRequest, SaleStatus, StockMovement, StockMovementReason,
    StockMovementType, UpdateSaleRequest, ValidationError,
};

use crate::error::{BackendError, BackendResult, Entity};
use crate::repository::sale::SaleRepository;
use crate::service::simulate_latency;
use crate::store::{Collections, MemoryStore};

/// One product's net stock change planned by a sale operation.
///
/// Positive `net` means units leave stock (sold), negative means units
/// come back (returned).
struct StockChange {
    product_id: String,
    net: i64,
}

/// Service exposing the sale workflow.
#[derive(Debug, Clone)]
pub struct SaleService {
    store: MemoryStore,
    repository: SaleRepository,
    latency: Duration,
}

impl SaleService {
    /// Creates a new SaleService.
    pub fn new(store: MemoryStore, latency: Duration) -> Self {
        SaleService {
            repository: SaleRepository::new(store.clone()),
            store,
            latency,
        }
    }

    /// Lists sales matching the query.
    pub async fn list(&self, query: &ListSalesQuery) -> PaginatedResponse<Sale> {
        simulate_latency(self.latency).await;
        self.repository.list(query).await
    }

    /// Gets a sale by id.
    pub async fn get(&self, id: &str) -> BackendResult<Sale> {
        simulate_latency(self.latency).await;
        self.repository
            .get(id)
            .await
            .ok_or_else(|| BackendError::not_found(Entity::Sale, id))
    }

    /// Records a new sale.
    ///
    /// ## What This Does
    /// 1. Validates the payload (at least one item, positive quantities,
    ///    non-negative prices and discounts)
    /// 2. Under one write guard: resolves the customer, resolves every
    ///    product, and checks stock for the whole item list — duplicate
    ///    lines of the same product count cumulatively
    /// 3. Only then debits stock, appends ledger movements, assigns the
    ///    next `VND-` code and inserts the sale at the front
    ///
    /// The sale is recorded as Completed; `pendente` only arrives through
    /// an explicit update.
    pub async fn create(&self, request: CreateSaleRequest) -> BackendResult<Sale> {
        simulate_latency(self.latency).await;

        validate_items_payload(&request.items)?;
        if let Some(discount) = request.discount {
            validate_discount(discount)?;
        }
        if let Some(notes) = request.notes.as_deref() {
            validate_notes(notes)?;
        }

        let mut data = self.store.write().await;

        let customer = data
            .customer(&request.customer_id)
            .ok_or_else(|| BackendError::not_found(Entity::Customer, &request.customer_id))?;
        let customer = CustomerSnapshot {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
        };

        let changes = plan_stock_changes(&data, &request.items, &HashMap::new())?;
        let items = build_items(&data, &request.items, true)?;

        let subtotal: Money = items.iter().map(|item| item.total).sum();
        let discount = request.discount.unwrap_or_default();
        let now = Utc::now();

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            code: data.next_sale_code(),
            date: request.date,
            customer,
            items,
            subtotal,
            discount,
            total: (subtotal - discount).floor_at_zero(),
            status: SaleStatus::Completed,
            payment_method: request.payment_method,
            notes: request.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        apply_stock_changes(&mut data, &changes, &sale.code, now);

        debug!(id = %sale.id, code = %sale.code, total = %sale.total, "Recording sale");
        data.sales.insert(0, sale.clone());
        Ok(sale)
    }

    /// Applies a partial update to a sale.
    ///
    /// ## What This Does
    /// 1. Rejects edits on canceled sales, and rejects `status: cancelada`
    ///    (cancellation has stock side effects, so it is its own operation)
    /// 2. When `items` is present, rebalances stock as one transaction:
    ///    quantities from the current items count as available again, the
    ///    new list is validated against those post-restore levels, and only
    ///    the net difference per product is applied and recorded
    /// 3. Re-snapshots the customer when `customerId` changes hands
    /// 4. Recomputes subtotal and the floored total
    ///
    /// A failed validation leaves every stock level and the sale untouched.
    pub async fn update(&self, id: &str, request: UpdateSaleRequest) -> BackendResult<Sale> {
        simulate_latency(self.latency).await;

        if let Some(items) = request.items.as_deref() {
            validate_items_payload(items)?;
        }
        if let Some(discount) = request.discount {
            validate_discount(discount)?;
        }
        if let Some(notes) = request.notes.as_deref() {
            validate_notes(notes)?;
        }

        let mut data = self.store.write().await;

        let mut updated = data
            .sale(id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(Entity::Sale, id))?;

        if updated.status == SaleStatus::Canceled {
            return Err(BackendError::CanceledImmutable {
                code: updated.code,
            });
        }
        if request.status == Some(SaleStatus::Canceled) {
            return Err(BackendError::CancelViaEdit { code: updated.code });
        }

        if let Some(customer_id) = request.customer_id.as_deref() {
            let customer = data
                .customer(customer_id)
                .ok_or_else(|| BackendError::not_found(Entity::Customer, customer_id))?;
            updated.customer = CustomerSnapshot {
                id: customer.id.clone(),
                name: customer.name.clone(),
                email: customer.email.clone(),
            };
        }

        let changes = match request.items.as_deref() {
            Some(item_requests) => {
                let restored = restored_quantities(&data, &updated.items);
                let changes = plan_stock_changes(&data, item_requests, &restored)?;
                updated.items = build_items(&data, item_requests, false)?;
                changes
            }
            None => Vec::new(),
        };

        if let Some(date) = request.date {
            updated.date = date;
        }
        if let Some(discount) = request.discount {
            updated.discount = discount;
        }
        if let Some(status) = request.status {
            updated.status = status;
        }
        if let Some(payment_method) = request.payment_method {
            updated.payment_method = payment_method;
        }
        if let Some(notes) = request.notes {
            updated.notes = notes;
        }

        updated.subtotal = updated.items.iter().map(|item| item.total).sum();
        updated.total = (updated.subtotal - updated.discount).floor_at_zero();

        let now = Utc::now();
        updated.updated_at = now;

        apply_stock_changes(&mut data, &changes, &updated.code, now);

        debug!(id = %id, code = %updated.code, "Updating sale");
        if let Some(stored) = data.sale_mut(id) {
            *stored = updated.clone();
        }
        Ok(updated)
    }

    /// Cancels a sale, returning every item to stock.
    ///
    /// ## What This Does
    /// 1. Rejects a second cancellation (the first already restored stock)
    /// 2. Credits each item's quantity back to its product and records a
    ///    return movement — items whose product was deleted are skipped
    /// 3. Marks the sale `cancelada`, a terminal state
    pub async fn cancel(&self, id: &str) -> BackendResult<Sale> {
        simulate_latency(self.latency).await;

        let mut data = self.store.write().await;

        let mut sale = data
            .sale(id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(Entity::Sale, id))?;

        if sale.status == SaleStatus::Canceled {
            return Err(BackendError::AlreadyCanceled { code: sale.code });
        }

        let changes = restore_changes(&data, &sale.items);
        let now = Utc::now();
        apply_stock_changes(&mut data, &changes, &sale.code, now);

        sale.status = SaleStatus::Canceled;
        sale.updated_at = now;

        debug!(id = %id, code = %sale.code, "Canceling sale");
        if let Some(stored) = data.sale_mut(id) {
            *stored = sale.clone();
        }
        Ok(sale)
    }

    /// Removes a sale.
    ///
    /// Stock is restored exactly as cancel does it, unless the sale is
    /// already canceled (its units went back at cancellation time).
    pub async fn delete(&self, id: &str) -> BackendResult<Sale> {
        simulate_latency(self.latency).await;

        let mut data = self.store.write().await;

        let position = data
            .sales
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| BackendError::not_found(Entity::Sale, id))?;

        let sale = data.sales.remove(position);
        if sale.status != SaleStatus::Canceled {
            let changes = restore_changes(&data, &sale.items);
            apply_stock_changes(&mut data, &changes, &sale.code, Utc::now());
        }

        debug!(id = %id, code = %sale.code, "Deleting sale");
        Ok(sale)
    }
}

// =============================================================================
// Workflow Helpers
// =============================================================================

/// Field checks over a requested item list. Pure, runs before the lock.
fn validate_items_payload(items: &[SaleItemRequest]) -> BackendResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "itens".to_string(),
        }
        .into());
    }
    for item in items {
        validate_quantity(item.quantity)?;
        validate_price(item.price)?;
        if let Some(discount) = item.discount {
            validate_discount(discount)?;
        }
        if let Some(notes) = item.notes.as_deref() {
            validate_notes(notes)?;
        }
    }
    Ok(())
}

/// Plans the net stock change per product for a requested item list.
///
/// Walks the items in order, accumulating demand per stock-tracked product
/// so duplicate lines are counted together, and fails on the first line
/// that pushes a product past what is available. `restored` holds
/// quantities coming back from the item list being replaced; they count as
/// available and are netted out of the result.
fn plan_stock_changes(
    data: &Collections,
    items: &[SaleItemRequest],
    restored: &HashMap<String, i64>,
) -> BackendResult<Vec<StockChange>> {
    let mut demand: HashMap<String, i64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for item in items {
        let product = data.product(&item.product_id).ok_or_else(|| {
            BackendError::UnknownSaleItemProduct {
                id: item.product_id.clone(),
            }
        })?;
        if !product.is_stock_tracked() {
            continue;
        }

        let needed = demand.entry(product.id.clone()).or_insert(0);
        if *needed == 0 {
            order.push(product.id.clone());
        }
        *needed += item.quantity;

        let available = product.stock.unwrap_or(0) + restored.get(&product.id).copied().unwrap_or(0);
        if *needed > available {
            return Err(BackendError::insufficient_stock(
                &product.name,
                available,
                *needed,
            ));
        }
    }

    let mut changes: Vec<StockChange> = Vec::new();
    for product_id in order {
        let needed = demand.get(&product_id).copied().unwrap_or(0);
        let returned = restored.get(&product_id).copied().unwrap_or(0);
        let net = needed - returned;
        if net != 0 {
            changes.push(StockChange { product_id, net });
        }
    }
    // products dropped from the sale get a pure restore
    for (product_id, returned) in restored {
        if !demand.contains_key(product_id) {
            changes.push(StockChange {
                product_id: product_id.clone(),
                net: -returned,
            });
        }
    }
    Ok(changes)
}

/// Quantities that an existing item list would put back on the shelf.
///
/// Items whose product has been deleted, or whose product no longer tracks
/// stock, are skipped.
fn restored_quantities(data: &Collections, items: &[SaleItem]) -> HashMap<String, i64> {
    let mut restored: HashMap<String, i64> = HashMap::new();
    for item in items {
        let tracked = data
            .product(&item.product.id)
            .is_some_and(|p| p.is_stock_tracked());
        if tracked {
            *restored.entry(item.product.id.clone()).or_insert(0) += item.quantity;
        }
    }
    restored
}

/// Pure-restore change set used by cancel and delete.
fn restore_changes(data: &Collections, items: &[SaleItem]) -> Vec<StockChange> {
    restored_quantities(data, items)
        .into_iter()
        .map(|(product_id, returned)| StockChange {
            product_id,
            net: -returned,
        })
        .collect()
}

/// Applies planned stock deltas and appends the matching ledger movements.
///
/// Every change was validated against the same guard acquisition, so a
/// missing product here means it was never planned; it is skipped rather
/// than panicking.
fn apply_stock_changes(
    data: &mut Collections,
    changes: &[StockChange],
    sale_code: &str,
    now: DateTime<Utc>,
) {
    for change in changes {
        let applied = match data.product_mut(&change.product_id) {
            Some(product) => {
                let stock_before = product.stock.unwrap_or(0);
                let stock_after = stock_before - change.net;
                product.stock = Some(stock_after);
                product.updated_at = now;
                Some((stock_before, stock_after))
            }
            None => None,
        };

        if let Some((stock_before, stock_after)) = applied {
            let (movement_type, reason, quantity) = if change.net > 0 {
                (StockMovementType::Outbound, StockMovementReason::Sale, change.net)
            } else {
                (
                    StockMovementType::Inbound,
                    StockMovementReason::Return,
                    -change.net,
                )
            };
            data.stock_movements.push(StockMovement {
                id: Uuid::new_v4().to_string(),
                product_id: change.product_id.clone(),
                quantity,
                movement_type,
                reason,
                notes: Some(format!("Venda {sale_code}")),
                stock_before,
                stock_after,
                created_at: now,
            });
        }
    }
}

/// Builds the stored item list from the request, snapshotting products.
///
/// `fresh_ids` is set on create; update keeps the ids of lines the caller
/// carried over so they stay addressable.
fn build_items(
    data: &Collections,
    items: &[SaleItemRequest],
    fresh_ids: bool,
) -> BackendResult<Vec<SaleItem>> {
    items
        .iter()
        .map(|item| {
            let product = data.product(&item.product_id).ok_or_else(|| {
                BackendError::UnknownSaleItemProduct {
                    id: item.product_id.clone(),
                }
            })?;
            let id = if fresh_ids {
                Uuid::new_v4().to_string()
            } else {
                item.id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string())
            };
            Ok(SaleItem {
                id,
                product: ProductSnapshot {
                    id: product.id.clone(),
                    name: product.name.clone(),
                },
                quantity: item.quantity,
                price: item.price,
                discount: item.discount.unwrap_or_default(),
                notes: item.notes.clone().unwrap_or_default(),
                total: item.total(),
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
