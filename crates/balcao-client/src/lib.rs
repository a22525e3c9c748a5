//! # balcao-client: UI-Facing State Containers
//!
//! The layer a frontend binds to. Each screen family gets one container
//! that caches what the screen shows and refreshes it through the typed
//! services of `balcao-backend`.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           balcao-client                                 │
//! │                                                                         │
//! │   CustomersState      ProductsState       SalesState     DashboardState │
//! │   ┌────────────┐      ┌────────────┐     ┌───────────┐   ┌───────────┐ │
//! │   │ list cache │      │ list cache │     │ list cache│   │ metrics   │ │
//! │   │ current    │      │ current    │     │ current   │   │ rankings  │ │
//! │   │ loading    │      │ loading    │     │ loading   │   │ alerts    │ │
//! │   │ saving     │      │ saving     │     │ saving    │   │ loading   │ │
//! │   │ error      │      │ error      │     │ error     │   └─────┬─────┘ │
//! │   └─────┬──────┘      └─────┬──────┘     └─────┬─────┘         │       │
//! │         │                   │                  │               │       │
//! │         ▼                   ▼                  ▼               ▼       │
//! │   CustomerService     ProductService      SaleService  DashboardService│
//! │                          (balcao-backend)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Container Contract
//! Every container follows the same rules:
//! 1. **Snapshot behind a mutex**: reads clone out, writes patch in place;
//!    the lock is never held across an `await`
//! 2. **Two statuses**: `loading` for reads, `saving` for writes, so a
//!    failed save never blanks a loaded table
//! 3. **Backend is the source of truth**: caches only fold in records the
//!    backend returned, and a failed call leaves the cache as it was
//! 4. **Errors are operator-facing**: `error` holds the backend's message
//!    verbatim, ready to render
//!
//! ## Usage
//! ```rust,ignore
//! use balcao_backend::{Backend, BackendConfig};
//! use balcao_client::{CustomersState, DashboardState};
//!
//! let backend = Backend::new(BackendConfig::new());
//! let customers = CustomersState::new(backend.customers());
//!
//! customers.fetch_list(Default::default()).await;
//! let count = customers.with_state(|s| s.customers.len());
//! ```

pub mod customers;
pub mod dashboard;
pub mod products;
pub mod sales;
pub mod status;

// =============================================================================
// Re-exports
// =============================================================================

pub use customers::{CustomersSnapshot, CustomersState};
pub use dashboard::{DashboardSnapshot, DashboardState};
pub use products::{ProductsSnapshot, ProductsState};
pub use sales::{SalesSnapshot, SalesState};
pub use status::LoadingStatus;
