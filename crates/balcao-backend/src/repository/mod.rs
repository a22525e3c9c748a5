//! # Repository Module
//!
//! Data access over the in-memory store, one repository per entity.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Service                                                                │
//! │       │                                                                 │
//! │       │  backend.customers().list(&query)                               │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                     │
//! │  ├── list(&self, query)                                                 │
//! │  ├── get(&self, id)                                                     │
//! │  ├── insert(&self, customer)                                            │
//! │  ├── save(&self, customer)                                              │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  read()/write() on the shared store                             │
//! │       ▼                                                                 │
//! │  MemoryStore (Arc<RwLock<Collections>>)                                 │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Collections are never touched raw by callers                        │
//! │  • Each test builds its own store, no shared module state              │
//! │  • The locking discipline lives in one place                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Scope
//! Repositories cover plain CRUD, each method one lock acquisition. The
//! sale workflow and manual stock adjustments need several collections
//! under one write guard, so those live in the service layer instead of
//! being squeezed into this shape.
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer CRUD and document probe
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD, SKU probe, movement history
//! - [`SaleRepository`](sale::SaleRepository) - Sale read side (list and get)

pub mod customer;
pub mod product;
pub mod sale;
