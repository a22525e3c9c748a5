//! # Product Service
//!
//! Operations on the product catalog and its stock ledger.
//!
//! ## Stock Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two ways stock changes, one rule for both                              │
//! │                                                                         │
//! │  SaleService                    ProductService                          │
//! │  (sell / cancel / edit)         (manual adjustment)                     │
//! │       │                              │                                  │
//! │       └──────────┬───────────────────┘                                  │
//! │                  ▼                                                      │
//! │        store.write().await  ← single guard                              │
//! │                  │                                                      │
//! │        validate everything first                                        │
//! │                  │                                                      │
//! │        mutate stock + append movement                                   │
//! │                  ▼                                                      │
//! │        stock never goes negative, ledger never skips a step             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use balcao_core::validation::{validate_name, validate_notes, validate_price, validate_quantity, validate_sku};
use balcao_core::{
    CreateProductRequest, CreateStockMovementRequest, ListProductsQuery, Money, PaginatedResponse,
    Product, ProductType, StockMovement, StockMovementType, UpdateProductRequest, ValidationError,
};

use crate::error::{BackendError, BackendResult, Entity};
use crate::repository::product::ProductRepository;
use crate::service::{blank_to_none, simulate_latency};
use crate::store::MemoryStore;

/// Service exposing the product operations.
#[derive(Debug, Clone)]
pub struct ProductService {
    store: MemoryStore,
    repository: ProductRepository,
    latency: Duration,
}

impl ProductService {
    /// Creates a new ProductService.
    pub fn new(store: MemoryStore, latency: Duration) -> Self {
        ProductService {
            repository: ProductRepository::new(store.clone()),
            store,
            latency,
        }
    }

    /// Lists products matching the query.
    pub async fn list(&self, query: &ListProductsQuery) -> PaginatedResponse<Product> {
        simulate_latency(self.latency).await;
        self.repository.list(query).await
    }

    /// Gets a product by id.
    pub async fn get(&self, id: &str) -> BackendResult<Product> {
        simulate_latency(self.latency).await;
        self.repository
            .get(id)
            .await
            .ok_or_else(|| BackendError::not_found(Entity::Product, id))
    }

    /// Adds a product to the catalog.
    ///
    /// ## What This Does
    /// 1. Validates SKU, name, price and the numeric fields
    /// 2. Rejects stock fields on service-type entries (services are never
    ///    stock-tracked)
    /// 3. Inserts with a fresh id and timestamps (`isActive` defaults true)
    pub async fn create(&self, request: CreateProductRequest) -> BackendResult<Product> {
        simulate_latency(self.latency).await;

        validate_sku(&request.sku)?;
        validate_name(&request.name)?;
        validate_price(request.price)?;
        validate_product_numbers(request.cost_price, request.stock, request.min_stock)?;
        if request.product_type == ProductType::Service
            && (request.stock.is_some() || request.min_stock.is_some())
        {
            return Err(ValidationError::ServiceHasNoStock.into());
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            sku: request.sku.trim().to_string(),
            name: request.name,
            description: request.description.and_then(blank_to_none),
            product_type: request.product_type,
            price: request.price,
            cost_price: request.cost_price,
            stock: request.stock,
            min_stock: request.min_stock,
            unit: request.unit.and_then(blank_to_none),
            brand: request.brand.and_then(blank_to_none),
            is_active: request.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, sku = %product.sku, "Creating product");
        Ok(self.repository.insert(product).await)
    }

    /// Applies a partial update to a product.
    ///
    /// Absent fields keep their current value; blank strings clear optional
    /// text fields. Changing the type to service stops stock tracking: the
    /// stored stock fields are cleared, and sending stock values together
    /// with the service type is rejected.
    pub async fn update(&self, id: &str, request: UpdateProductRequest) -> BackendResult<Product> {
        simulate_latency(self.latency).await;

        let mut product = self
            .repository
            .get(id)
            .await
            .ok_or_else(|| BackendError::not_found(Entity::Product, id))?;

        let explicit_stock = request.stock.is_some() || request.min_stock.is_some();

        if let Some(sku) = request.sku {
            product.sku = sku.trim().to_string();
        }
        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(description) = request.description {
            product.description = blank_to_none(description);
        }
        if let Some(product_type) = request.product_type {
            product.product_type = product_type;
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(cost_price) = request.cost_price {
            product.cost_price = Some(cost_price);
        }
        if let Some(stock) = request.stock {
            product.stock = Some(stock);
        }
        if let Some(min_stock) = request.min_stock {
            product.min_stock = Some(min_stock);
        }
        if let Some(unit) = request.unit {
            product.unit = blank_to_none(unit);
        }
        if let Some(brand) = request.brand {
            product.brand = blank_to_none(brand);
        }
        if let Some(is_active) = request.is_active {
            product.is_active = is_active;
        }

        validate_sku(&product.sku)?;
        validate_name(&product.name)?;
        validate_price(product.price)?;
        validate_product_numbers(product.cost_price, product.stock, product.min_stock)?;

        if product.product_type == ProductType::Service {
            if explicit_stock {
                return Err(ValidationError::ServiceHasNoStock.into());
            }
            if product.stock.is_some() || product.min_stock.is_some() {
                debug!(id = %id, "Type changed to service, clearing stock tracking");
                product.stock = None;
                product.min_stock = None;
            }
        }

        product.updated_at = Utc::now();
        self.repository.save(product).await
    }

    /// Removes a product from the catalog.
    ///
    /// Sales keep their product snapshots and the movement ledger keeps its
    /// history, so past records stay readable.
    pub async fn delete(&self, id: &str) -> BackendResult<Product> {
        simulate_latency(self.latency).await;
        self.repository.delete(id).await
    }

    /// Activates or deactivates a product.
    pub async fn set_active(&self, id: &str, is_active: bool) -> BackendResult<Product> {
        simulate_latency(self.latency).await;

        let mut product = self
            .repository
            .get(id)
            .await
            .ok_or_else(|| BackendError::not_found(Entity::Product, id))?;

        debug!(id = %id, is_active, "Toggling product activation");
        product.is_active = is_active;
        product.updated_at = Utc::now();
        self.repository.save(product).await
    }

    /// Checks whether a SKU is already taken (case-insensitive).
    pub async fn sku_exists(&self, sku: &str, exclude_id: Option<&str>) -> bool {
        simulate_latency(self.latency).await;
        self.repository.sku_exists(sku, exclude_id).await
    }

    /// Applies a manual stock adjustment and records it in the ledger.
    ///
    /// ## What This Does
    /// 1. Validates quantity and notes
    /// 2. Under one write guard: resolves the product, requires stock
    ///    tracking, and rejects an outbound movement that would go negative
    /// 3. Applies the delta, bumps `updatedAt`, appends the movement with
    ///    its stockBefore/stockAfter pair
    ///
    /// The guard covers the whole check-then-apply sequence, so two
    /// concurrent outbound movements cannot both pass the same balance.
    pub async fn add_stock_movement(
        &self,
        product_id: &str,
        request: CreateStockMovementRequest,
    ) -> BackendResult<StockMovement> {
        simulate_latency(self.latency).await;

        validate_quantity(request.quantity)?;
        if let Some(notes) = request.notes.as_deref() {
            validate_notes(notes)?;
        }

        let mut data = self.store.write().await;

        let product = data
            .product_mut(product_id)
            .ok_or_else(|| BackendError::not_found(Entity::Product, product_id))?;

        if product.product_type == ProductType::Service {
            return Err(ValidationError::ServiceHasNoStock.into());
        }
        let stock_before = match product.stock {
            Some(stock) => stock,
            None => return Err(ValidationError::StockNotTracked.into()),
        };

        let stock_after = match request.movement_type {
            StockMovementType::Inbound => stock_before + request.quantity,
            StockMovementType::Outbound => {
                if request.quantity > stock_before {
                    return Err(BackendError::insufficient_stock(
                        &product.name,
                        stock_before,
                        request.quantity,
                    ));
                }
                stock_before - request.quantity
            }
        };

        let now = Utc::now();
        product.stock = Some(stock_after);
        product.updated_at = now;

        let movement = StockMovement {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity: request.quantity,
            movement_type: request.movement_type,
            reason: request.reason,
            notes: request.notes.and_then(blank_to_none),
            stock_before,
            stock_after,
            created_at: now,
        };

        debug!(
            product_id = %product_id,
            quantity = request.quantity,
            stock_before,
            stock_after,
            "Recording stock movement"
        );
        data.stock_movements.push(movement.clone());
        Ok(movement)
    }

    /// Movement history for one product, newest first.
    pub async fn stock_movements(&self, product_id: &str) -> Vec<StockMovement> {
        simulate_latency(self.latency).await;
        self.repository.movements(product_id).await
    }
}

/// Shared numeric checks for create and the merged update result.
fn validate_product_numbers(
    cost_price: Option<Money>,
    stock: Option<i64>,
    min_stock: Option<i64>,
) -> BackendResult<()> {
    if let Some(cost) = cost_price {
        if cost.is_negative() {
            return Err(ValidationError::NegativeNotAllowed {
                field: "preço de custo".to_string(),
            }
            .into());
        }
    }
    if stock.is_some_and(|s| s < 0) {
        return Err(ValidationError::NegativeNotAllowed {
            field: "estoque".to_string(),
        }
        .into());
    }
    if min_stock.is_some_and(|s| s < 0) {
        return Err(ValidationError::NegativeNotAllowed {
            field: "estoque mínimo".to_string(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
