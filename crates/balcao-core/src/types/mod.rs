//! Domain types for Balcão: entities, request payloads and list queries.
//!
//! Each entity module carries the full surface for its aggregate:
//!
//! - the entity itself plus its enums, serialized with the Portuguese wire
//!   values the UI speaks (`fisica`, `produto`, `concluida`, ...);
//! - `Create*`/`Update*` request payloads (updates are partial: absent
//!   fields keep their current value);
//! - a `List*Query` with a typed sort-field enum and an `apply` method
//!   running the shared filter → sort → paginate pipeline from
//!   [`crate::query`].
//!
//! All wire names are camelCase, and every type derives `TS` so the
//! frontend bindings are generated, never hand-written.

mod customer;
mod dashboard;
mod product;
mod sale;

pub use customer::{
    CreateCustomerRequest, Customer, CustomerSortField, CustomerType, ListCustomersQuery,
    UpdateCustomerRequest,
};
pub use dashboard::{DashboardMetrics, TopProduct};
pub use product::{
    CreateProductRequest, CreateStockMovementRequest, ListProductsQuery, Product,
    ProductSortField, ProductType, StockMovement, StockMovementReason, StockMovementType,
    UpdateProductRequest,
};
pub use sale::{
    CreateSaleRequest, CustomerSnapshot, ListSalesQuery, PaymentMethod, ProductSnapshot, Sale,
    SaleItem, SaleItemRequest, SaleSortField, SaleStatus, UpdateSaleRequest,
};
