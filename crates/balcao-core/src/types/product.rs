//! Product catalog types: products, services and stock movements.
//!
//! ## Stock model
//!
//! Only `produto`-type entries with a known `stock` value are stock-tracked;
//! `servico`-type entries never carry stock. A product whose `stock` is
//! absent is sellable without limit — the store simply has not counted it
//! yet. Every stock change performed by the sale workflow is also recorded
//! as a [`StockMovement`] with before/after readings, so the history screen
//! can reconstruct how a balance came to be.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::query::{self, PaginatedResponse, SortDirection};

// =============================================================================
// Product Type
// =============================================================================

/// Whether an entry is a physical good or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductType {
    /// Physical good, may track stock.
    #[serde(rename = "produto")]
    Product,
    /// Service, never tracks stock.
    #[serde(rename = "servico")]
    Service,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry: physical product or service.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    /// Unique merchant-facing code (e.g. "NOT001").
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Sale price per unit.
    pub price: Money,
    /// Acquisition cost, used for margin reporting.
    pub cost_price: Option<Money>,
    /// Current balance. `None` means stock is not tracked for this entry.
    pub stock: Option<i64>,
    /// Alert threshold: the product is "low" when stock drops below this.
    pub min_stock: Option<i64>,
    /// Unit of measure shown next to quantities (e.g. "un", "h").
    pub unit: Option<String>,
    pub brand: Option<String>,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// True when this entry participates in stock control.
    #[inline]
    pub fn is_stock_tracked(&self) -> bool {
        self.product_type == ProductType::Product && self.stock.is_some()
    }

    /// True when the entry shows up under an "in stock" filter.
    ///
    /// Services always qualify; products need a positive counted balance.
    pub fn is_in_stock(&self) -> bool {
        match self.product_type {
            ProductType::Service => true,
            ProductType::Product => self.stock.unwrap_or(0) > 0,
        }
    }

    /// True when a sale of `quantity` units can be fulfilled.
    ///
    /// Services and uncounted products are unlimited; tracked products
    /// need at least `quantity` on hand.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        match (self.product_type, self.stock) {
            (ProductType::Product, Some(stock)) => stock >= quantity,
            _ => true,
        }
    }

    /// True when the balance has dropped below the alert threshold.
    ///
    /// The comparison is strict: a product sitting exactly at `min_stock`
    /// is not yet low.
    pub fn is_below_min_stock(&self) -> bool {
        match (self.stock, self.min_stock) {
            (Some(stock), Some(min)) => self.product_type == ProductType::Product && stock < min,
            _ => false,
        }
    }

    /// Sale value of the current balance (price × stock), zero when the
    /// entry is not stock-tracked.
    pub fn stock_value(&self) -> Money {
        match (self.product_type, self.stock) {
            (ProductType::Product, Some(stock)) => self.price * stock,
            _ => Money::zero(),
        }
    }

    /// Profit margin over cost in basis points (4999 = 49.99%).
    ///
    /// `None` when the cost price is unknown or not positive.
    pub fn profit_margin_bps(&self) -> Option<i64> {
        let cost = self.cost_price?;
        if !cost.is_positive() {
            return None;
        }
        let profit = (self.price - cost).cents() as i128;
        Some((profit * 10_000 / cost.cents() as i128) as i64)
    }
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Payload for adding a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub price: Money,
    pub cost_price: Option<Money>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub unit: Option<String>,
    pub brand: Option<String>,
    /// Defaults to `true` when omitted.
    pub is_active: Option<bool>,
}

/// Partial update for a catalog entry. Absent fields keep their current
/// value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct UpdateProductRequest {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    pub price: Option<Money>,
    pub cost_price: Option<Money>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub unit: Option<String>,
    pub brand: Option<String>,
    pub is_active: Option<bool>,
}

// =============================================================================
// Stock Movements
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StockMovementType {
    #[serde(rename = "entrada")]
    Inbound,
    #[serde(rename = "saida")]
    Outbound,
}

/// Business reason behind a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StockMovementReason {
    #[serde(rename = "compra")]
    Purchase,
    #[serde(rename = "venda")]
    Sale,
    #[serde(rename = "ajuste")]
    Adjustment,
    #[serde(rename = "devolucao")]
    Return,
}

/// One entry in a product's stock history.
///
/// `stock_before`/`stock_after` are readings taken when the movement was
/// applied, so the history stays meaningful even after later corrections.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    /// Units moved, always positive; direction lives in `movement_type`.
    pub quantity: i64,
    #[serde(rename = "type")]
    pub movement_type: StockMovementType,
    pub reason: StockMovementReason,
    pub notes: Option<String>,
    pub stock_before: i64,
    pub stock_after: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Payload for a manual stock adjustment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateStockMovementRequest {
    pub quantity: i64,
    #[serde(rename = "type")]
    pub movement_type: StockMovementType,
    pub reason: StockMovementReason,
    pub notes: Option<String>,
}

// =============================================================================
// List Query
// =============================================================================

/// Sortable columns of the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ProductSortField {
    Name,
    Sku,
    Price,
    Stock,
    CreatedAt,
}

impl ProductSortField {
    fn compare(self, a: &Product, b: &Product) -> std::cmp::Ordering {
        match self {
            ProductSortField::Name => query::cmp_ci(&a.name, &b.name),
            ProductSortField::Sku => query::cmp_ci(&a.sku, &b.sku),
            ProductSortField::Price => a.price.cmp(&b.price),
            // Uncounted stock sorts before counted balances.
            ProductSortField::Stock => a.stock.cmp(&b.stock),
            ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Query parameters of the product list endpoint.
///
/// `search` looks case-insensitively at name, SKU, description and brand;
/// the price bounds are inclusive; `in_stock: Some(true)` keeps services
/// and products with a positive counted balance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ListProductsQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub in_stock: Option<bool>,
    pub is_active: Option<bool>,
    pub brand: Option<String>,
    pub sort: Option<ProductSortField>,
    pub order: SortDirection,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListProductsQuery {
    /// Runs the filter → sort → paginate pipeline over the full collection.
    pub fn apply(&self, products: Vec<Product>) -> PaginatedResponse<Product> {
        let mut filtered: Vec<Product> =
            products.into_iter().filter(|p| self.matches(p)).collect();

        if let Some(field) = self.sort {
            filtered.sort_by(|a, b| self.order.apply(field.compare(a, b)));
        }

        query::paginate(filtered, self.page, self.limit)
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(search) = self.search.as_deref() {
            let fields = [
                Some(product.name.as_str()),
                Some(product.sku.as_str()),
                product.description.as_deref(),
                product.brand.as_deref(),
            ];
            if !search.is_empty() && !query::matches_search(fields, search) {
                return false;
            }
        }
        if let Some(product_type) = self.product_type {
            if product.product_type != product_type {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        if self.in_stock.unwrap_or(false) && !product.is_in_stock() {
            return false;
        }
        if let Some(is_active) = self.is_active {
            if product.is_active != is_active {
                return false;
            }
        }
        if let Some(brand) = self.brand.as_deref() {
            if product.brand.as_deref() != Some(brand) {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(sku: &str, name: &str, price_cents: i64) -> Product {
        let created = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        Product {
            id: format!("prod-{sku}"),
            sku: sku.to_string(),
            name: name.to_string(),
            description: None,
            product_type: ProductType::Product,
            price: Money::from_cents(price_cents),
            cost_price: None,
            stock: Some(10),
            min_stock: None,
            unit: Some("un".to_string()),
            brand: None,
            is_active: true,
            created_at: created,
            updated_at: created,
        }
    }

    fn service(sku: &str, name: &str, price_cents: i64) -> Product {
        Product {
            product_type: ProductType::Service,
            stock: None,
            unit: Some("h".to_string()),
            ..product(sku, name, price_cents)
        }
    }

    fn sample() -> Vec<Product> {
        let mut notebook = product("NOT001", "Notebook Dell", 759_999);
        notebook.brand = Some("Dell".to_string());
        notebook.description = Some("Notebook 16GB RAM".to_string());
        let mut mouse = product("MOUSE001", "Mouse Sem Fio", 14_999);
        mouse.brand = Some("Logitech".to_string());
        let mut esgotado = product("CABO001", "Cabo HDMI", 4_999);
        esgotado.stock = Some(0);
        let mut sem_contagem = product("AVULSO001", "Item Avulso", 9_999);
        sem_contagem.stock = None;
        vec![
            notebook,
            mouse,
            esgotado,
            sem_contagem,
            service("SERV001", "Formatação", 15_000),
        ]
    }

    #[test]
    fn test_search_covers_sku_description_and_brand() {
        let by_sku = ListProductsQuery {
            search: Some("mouse001".to_string()),
            ..Default::default()
        };
        assert_eq!(by_sku.apply(sample()).pagination.total, 1);

        let by_description = ListProductsQuery {
            search: Some("16gb".to_string()),
            ..Default::default()
        };
        assert_eq!(by_description.apply(sample()).pagination.total, 1);

        let by_brand = ListProductsQuery {
            search: Some("logi".to_string()),
            ..Default::default()
        };
        assert_eq!(by_brand.apply(sample()).data[0].sku, "MOUSE001");
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let query = ListProductsQuery {
            min_price: Some(Money::from_cents(14_999)),
            max_price: Some(Money::from_cents(15_000)),
            ..Default::default()
        };
        let result = query.apply(sample());
        let skus: Vec<&str> = result.data.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["MOUSE001", "SERV001"]);
    }

    #[test]
    fn test_in_stock_keeps_services_and_positive_balances() {
        let query = ListProductsQuery {
            in_stock: Some(true),
            ..Default::default()
        };
        let result = query.apply(sample());
        let skus: Vec<&str> = result.data.iter().map(|p| p.sku.as_str()).collect();
        // Zero balance and uncounted stock both drop out; the service stays.
        assert_eq!(skus, vec!["NOT001", "MOUSE001", "SERV001"]);
    }

    #[test]
    fn test_in_stock_false_is_a_no_op() {
        let query = ListProductsQuery {
            in_stock: Some(false),
            ..Default::default()
        };
        assert_eq!(query.apply(sample()).pagination.total, 5);
    }

    #[test]
    fn test_brand_filter_is_exact() {
        let query = ListProductsQuery {
            brand: Some("Dell".to_string()),
            ..Default::default()
        };
        let result = query.apply(sample());
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].sku, "NOT001");

        let lowercase = ListProductsQuery {
            brand: Some("dell".to_string()),
            ..Default::default()
        };
        assert_eq!(lowercase.apply(sample()).pagination.total, 0);
    }

    #[test]
    fn test_sort_by_price() {
        let query = ListProductsQuery {
            sort: Some(ProductSortField::Price),
            ..Default::default()
        };
        let result = query.apply(sample());
        assert_eq!(result.data[0].sku, "CABO001");
        assert_eq!(result.data[4].sku, "NOT001");
    }

    #[test]
    fn test_sort_by_stock_puts_uncounted_first() {
        let query = ListProductsQuery {
            sort: Some(ProductSortField::Stock),
            ..Default::default()
        };
        let result = query.apply(sample());
        assert_eq!(result.data[0].sku, "AVULSO001");
        assert_eq!(result.data[1].sku, "SERV001");
        assert_eq!(result.data[2].sku, "CABO001");
    }

    #[test]
    fn test_pagination_after_filtering() {
        let query = ListProductsQuery {
            product_type: Some(ProductType::Product),
            page: Some(2),
            limit: Some(3),
            ..Default::default()
        };
        let result = query.apply(sample());
        assert_eq!(result.pagination.total, 4);
        assert_eq!(result.pagination.total_pages, 2);
        assert_eq!(result.data.len(), 1);
    }

    #[test]
    fn test_stock_tracking_predicates() {
        let tracked = product("A", "a", 100);
        assert!(tracked.is_stock_tracked());
        assert!(tracked.is_in_stock());
        assert!(tracked.can_fulfill(10));
        assert!(!tracked.can_fulfill(11));

        let mut uncounted = product("B", "b", 100);
        uncounted.stock = None;
        assert!(!uncounted.is_stock_tracked());
        assert!(!uncounted.is_in_stock());
        assert!(uncounted.can_fulfill(1_000));

        let svc = service("C", "c", 100);
        assert!(!svc.is_stock_tracked());
        assert!(svc.is_in_stock());
        assert!(svc.can_fulfill(1_000));
    }

    #[test]
    fn test_below_min_stock_is_strict() {
        let mut p = product("A", "a", 100);
        p.stock = Some(5);
        p.min_stock = Some(5);
        assert!(!p.is_below_min_stock());
        p.stock = Some(4);
        assert!(p.is_below_min_stock());
        p.min_stock = None;
        assert!(!p.is_below_min_stock());
    }

    #[test]
    fn test_stock_value() {
        let mut p = product("A", "a", 14_999);
        p.stock = Some(3);
        assert_eq!(p.stock_value(), Money::from_cents(44_997));
        assert_eq!(service("B", "b", 15_000).stock_value(), Money::zero());
    }

    #[test]
    fn test_profit_margin_bps() {
        let mut p = product("A", "a", 289_999);
        p.cost_price = Some(Money::from_cents(200_000));
        assert_eq!(p.profit_margin_bps(), Some(4_499));
        p.cost_price = None;
        assert_eq!(p.profit_margin_bps(), None);
        p.cost_price = Some(Money::zero());
        assert_eq!(p.profit_margin_bps(), None);
    }

    #[test]
    fn test_movement_wire_values() {
        let json = serde_json::to_string(&StockMovementType::Inbound).unwrap();
        assert_eq!(json, "\"entrada\"");
        let json = serde_json::to_string(&StockMovementReason::Return).unwrap();
        assert_eq!(json, "\"devolucao\"");
    }
}
