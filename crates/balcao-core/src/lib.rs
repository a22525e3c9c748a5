//! # balcao-core: Pure Business Logic for Balcão
//!
//! This crate is the **heart** of Balcão. It contains all business rules
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Balcão Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/console (Demo Runner)                     │   │
//! │  │        seeds the store ──► walks the workflows ──► logs         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              balcao-client (State Containers)                   │   │
//! │  │     CustomersState ── ProductsState ── SalesState ── Dashboard  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              balcao-backend (Mocked Backend)                    │   │
//! │  │        MemoryStore, repositories, services, envelopes           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ balcao-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ document  │  │   query   │  │   │
//! │  │   │ Customer  │  │   Money   │  │ CPF/CNPJ  │  │ filter/   │  │   │
//! │  │   │ Product   │  │ centavos  │  │  check    │  │ sort/page │  │   │
//! │  │   │   Sale    │  │           │  │  digits   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK DEPENDENCE • NO NETWORK • PURE FUNCTIONS   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Sale, queries, payloads)
//! - [`money`] - Money type with integer centavo arithmetic (no floating point!)
//! - [`document`] - CPF/CNPJ check-digit validation and formatting
//! - [`query`] - Shared filter → sort → paginate pipeline primitives
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use balcao_core::document::is_valid_cpf;
//! use balcao_core::money::Money;
//!
//! // Create money from centavos (never from floats!)
//! let price = Money::from_cents(1099); // R$ 10,99
//! let total = price.multiply_quantity(3) - Money::from_cents(300);
//! assert_eq!(total.cents(), 2997);
//!
//! // Check digits follow the Receita Federal algorithm
//! assert!(is_valid_cpf("111.444.777-35"));
//! assert!(!is_valid_cpf("111.444.777-34"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod money;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use balcao_core::Money` instead of
// `use balcao_core::money::Money`

pub use document::DocumentKind;
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use query::{PaginatedResponse, Pagination, SortDirection};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a customer or product display name.
///
/// ## Why a constant?
/// The UI truncates around this width and the original backend rejected
/// anything longer. Centralized so the service layer and any future form
/// validation agree on the number.
pub const MAX_NAME_LEN: usize = 120;

/// Maximum length of a SKU.
pub const MAX_SKU_LEN: usize = 40;

/// Maximum length of free-form notes (customers, sales, sale items).
pub const MAX_NOTES_LEN: usize = 500;

/// Maximum quantity of a single item in a sale
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Can be made configurable in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Page number used when a list query omits one (or passes 0).
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when a list query omits one (or passes 0).
///
/// ## Business Reason
/// Ten rows is what the list screens render without scrolling; every
/// paginated endpoint falls back to the same size so the UI pager and the
/// backend never disagree.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
