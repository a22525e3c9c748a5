//! # Balcão Console
//!
//! End-to-end demo of the whole stack: containers over services over the
//! in-memory store, with simulated latency and the demo dataset.
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  console ──► balcao-client ──► balcao-backend ──► MemoryStore          │
//! │                                                                         │
//! │  1. List the product catalog                                            │
//! │  2. Run a filtered, paginated customer query (+ wire shape)             │
//! │  3. Record a sale and show the stock debit                              │
//! │  4. Attempt an over-stock sale and show the atomic failure              │
//! │  5. Cancel the sale and show the stock restore                          │
//! │  6. Print the dashboard metrics                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exits non-zero if any step fails unexpectedly; the over-stock rejection
//! in step 4 is the expected outcome, not a failure.

mod config;

use std::error::Error;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use balcao_backend::{ApiEnvelope, Backend};
use balcao_client::{CustomersState, DashboardState, ProductsState, SalesState};
use balcao_core::{
    CreateSaleRequest, CustomerSortField, CustomerType, ListCustomersQuery, ListProductsQuery,
    ListSalesQuery, PaymentMethod, Sale, SaleItemRequest,
};

use crate::config::ConsoleConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,balcao=debug".into()),
        )
        .init();

    info!("Starting Balcão console demo...");

    // Load configuration
    let config = ConsoleConfig::load()?;
    info!(
        latency_ms = config.latency_ms,
        seed = config.seed_demo_data,
        "Configuration loaded"
    );

    // Build the stack the way a UI would
    let backend = Backend::new(config.backend_config());
    let customers = CustomersState::new(backend.customers());
    let products = ProductsState::new(backend.products());
    let sales = SalesState::new(backend.sales());
    let dashboard = DashboardState::new(backend.dashboard());

    // ========================================================================
    // 1. Product catalog
    // ========================================================================

    products.fetch_list(ListProductsQuery::default()).await;
    let catalog = products.snapshot();
    info!(
        total = catalog.products.len(),
        stock_value = %products.total_stock_value(),
        "Catalog loaded"
    );
    for product in &catalog.products {
        info!(
            sku = %product.sku,
            price = %product.price,
            stock = ?product.stock,
            "  {}",
            product.name
        );
    }

    // ========================================================================
    // 2. Filtered, paginated customer query
    // ========================================================================

    let query = ListCustomersQuery {
        customer_type: Some(CustomerType::Physical),
        sort: Some(CustomerSortField::Name),
        page: Some(1),
        limit: Some(2),
        ..ListCustomersQuery::default()
    };
    customers.fetch_list(query).await;
    let snapshot = customers.snapshot();
    let pagination = snapshot
        .pagination
        .ok_or("customer query returned no pagination")?;
    info!(
        page = pagination.page,
        total = pagination.total,
        total_pages = pagination.total_pages,
        "Pessoa física customers, sorted by name"
    );
    for customer in &snapshot.customers {
        info!(document = ?customer.document, "  {}", customer.name);
    }

    let buyer = snapshot
        .customers
        .first()
        .ok_or("demo dataset has no pessoa física customer")?
        .clone();

    // The wire shape a real frontend would receive for a single fetch
    let envelope = ApiEnvelope::from_result(backend.customers().get(&buyer.id).await);
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    // ========================================================================
    // 3. Record a sale
    // ========================================================================

    sales.fetch_list(ListSalesQuery::default()).await;
    info!(
        on_file = sales.with_state(|s| s.sales.len()),
        "Sale history loaded"
    );

    let product = catalog
        .products
        .iter()
        .find(|p| p.stock.is_some_and(|stock| stock >= 2))
        .ok_or("demo dataset has no product with stock to sell")?
        .clone();
    let stock_before = product.stock.unwrap_or(0);

    let sale = sales
        .create(CreateSaleRequest {
            date: Utc::now().date_naive(),
            customer_id: buyer.id.clone(),
            items: vec![SaleItemRequest {
                id: None,
                product_id: product.id.clone(),
                quantity: 2,
                price: product.price,
                discount: None,
                notes: None,
            }],
            discount: None,
            payment_method: PaymentMethod::Pix,
            notes: Some("Venda de demonstração".to_string()),
        })
        .await?;

    let debited = backend.products().get(&product.id).await?;
    info!(
        code = %sale.code,
        customer = %sale.customer.name,
        total = %sale.total,
        stock_before,
        stock_after = ?debited.stock,
        "Sale recorded; stock debited"
    );

    // ========================================================================
    // 4. Over-stock attempt
    // ========================================================================

    let available = debited.stock.unwrap_or(0);
    let over_stock = sales
        .create(CreateSaleRequest {
            date: Utc::now().date_naive(),
            customer_id: buyer.id.clone(),
            items: vec![SaleItemRequest {
                id: None,
                product_id: product.id.clone(),
                quantity: available + 1,
                price: product.price,
                discount: None,
                notes: None,
            }],
            discount: None,
            payment_method: PaymentMethod::Pix,
            notes: None,
        })
        .await;

    match over_stock {
        Ok(sale) => {
            return Err(format!("over-stock sale {} unexpectedly succeeded", sale.code).into());
        }
        Err(err) => {
            let envelope = ApiEnvelope::<Sale>::failure(&err);
            info!(
                status = envelope.status,
                requested = available + 1,
                available,
                "Over-stock sale rejected"
            );
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    let untouched = backend.products().get(&product.id).await?;
    info!(stock = ?untouched.stock, "Stock untouched after the rejected sale");

    // ========================================================================
    // 5. Cancel the sale
    // ========================================================================

    let canceled = sales.cancel(&sale.id).await?;
    let restored = backend.products().get(&product.id).await?;
    info!(
        code = %canceled.code,
        status = ?canceled.status,
        stock = ?restored.stock,
        "Sale canceled; stock restored"
    );

    // ========================================================================
    // 6. Dashboard
    // ========================================================================

    dashboard.refresh_all().await;
    let snapshot = dashboard.snapshot();
    if let Some(metrics) = snapshot.metrics {
        info!(
            revenue = %metrics.total_revenue,
            completed = metrics.completed_sales,
            pending = metrics.pending_sales,
            average_ticket = %metrics.average_ticket,
            customers = metrics.customer_count,
            products = metrics.product_count,
            low_stock = metrics.low_stock_count,
            "Dashboard metrics"
        );
    }
    for entry in &snapshot.top_products {
        info!(
            quantity = entry.quantity,
            revenue = %entry.revenue,
            "  Top seller: {}",
            entry.name
        );
    }
    for product in &snapshot.low_stock {
        info!(
            stock = ?product.stock,
            min_stock = ?product.min_stock,
            "  Low stock: {}",
            product.name
        );
    }

    info!("Demo session complete");
    Ok(())
}
