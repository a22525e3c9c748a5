//! # balcao-backend: In-Memory Backend for Balcão
//!
//! This crate provides the mocked backend the Balcão frontend develops
//! against: an in-memory store behind typed services, with simulated
//! network latency and the `{status, data, error}` response envelope.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Balcão Data Flow                                 │
//! │                                                                         │
//! │  Client container (products store)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   balcao-backend (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    Backend    │    │   Services    │    │ Repositories │   │   │
//! │  │   │ (service/mod) │    │ (customer.rs, │    │ (plain CRUD) │   │   │
//! │  │   │               │    │  product.rs,  │    │              │   │   │
//! │  │   │ Config        │◄───│  sale.rs,     │◄───│ CustomerRepo │   │   │
//! │  │   │ Latency       │    │  dashboard.rs)│    │ ProductRepo  │   │   │
//! │  │   └───────────────┘    └───────────────┘    │ SaleRepo     │   │   │
//! │  │                                             └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                MemoryStore (tokio::sync::RwLock)                │   │
//! │  │        customers · products · sales · stock movements           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The shared in-memory collections and their lock
//! - [`seed`] - The development demo dataset
//! - [`error`] - Backend error types and status-code mapping
//! - [`envelope`] - The serializable `{status, data, error}` response shape
//! - [`repository`] - Plain CRUD over the store, one type per entity
//! - [`service`] - The typed operations the frontend calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use balcao_backend::{Backend, BackendConfig};
//!
//! // Seeded backend with development latency
//! let backend = Backend::new(BackendConfig::new());
//!
//! // Typed operations instead of string routes
//! let page = backend.products().list(&ListProductsQuery::default()).await;
//! let sale = backend.sales().create(request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod envelope;
pub mod error;
pub mod repository;
pub mod seed;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use envelope::ApiEnvelope;
pub use error::{BackendError, BackendResult, Entity, ErrorKind};
pub use service::{Backend, BackendConfig};
pub use store::MemoryStore;

// Service re-exports for convenience
pub use service::customer::CustomerService;
pub use service::dashboard::DashboardService;
pub use service::product::ProductService;
pub use service::sale::SaleService;
