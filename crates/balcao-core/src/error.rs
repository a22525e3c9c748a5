//! # Error Types
//!
//! Validation error type for balcao-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  balcao-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  balcao-backend errors (separate crate)                                │
//! │  └── BackendError     - NotFound / Validation / Conflict               │
//! │                                                                         │
//! │  Response envelope (balcao-backend)                                    │
//! │  └── {status, data, error} - What the frontend sees (serialized)       │
//! │                                                                         │
//! │  Flow: ValidationError → BackendError → envelope → Frontend            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, limits)
//! 3. Errors are enum variants, never String
//! 4. Display strings are pt-BR: they are the user-facing contract the UI
//!    renders verbatim. Logs and code stay in English.

use thiserror::Error;

use crate::document::DocumentKind;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any collection is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} é obrigatório")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} deve ter no máximo {max} caracteres")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} deve ser maior que zero")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} não pode ser negativo")]
    NegativeNotAllowed { field: String },

    /// Numeric value is out of range.
    #[error("{field} deve estar entre {min} e {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed SKU).
    #[error("{field} em formato inválido: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Document failed the check-digit validation for its expected kind.
    ///
    /// ## When This Occurs
    /// - Physical customer with a document that is not a valid CPF
    /// - Legal customer with a document that is not a valid CNPJ
    #[error("{kind} inválido: {value}")]
    InvalidDocument { kind: DocumentKind, value: String },

    /// Stock fields sent for a service-type product.
    #[error("Serviços não controlam estoque")]
    ServiceHasNoStock,

    /// Stock movement requested for a product without stock tracking.
    #[error("Produto não controla estoque")]
    StockNotTracked,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
