//! # Validation Module
//!
//! Input validation utilities for Balcão.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service layer (Rust)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store invariants                                             │
//! │  ├── Non-negative stock                                                │
//! │  └── Total/subtotal consistency                                        │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use balcao_core::validation::{validate_sku, validate_quantity};
//!
//! assert!(validate_sku("NOT001").is_ok());
//! assert!(validate_quantity(5).is_ok());
//! ```

use crate::document::{self, DocumentKind};
use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_NOTES_LEN, MAX_SKU_LEN};

pub use crate::error::ValidationResult;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity display name (customer or product).
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 120 characters
///
/// ## Example
/// ```rust
/// use balcao_core::validation::validate_name;
///
/// assert!(validate_name("João Silva").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "nome".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "nome".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 40 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use balcao_core::validation::validate_sku;
///
/// assert!(validate_sku("MOUSE001").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "SKU".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "SKU".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    // Check for valid characters (alphanumeric, hyphen, underscore)
    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "SKU".to_string(),
            reason: "use apenas letras, números, hífens e sublinhados".to_string(),
        });
    }

    Ok(())
}

/// Validates free-form notes.
///
/// ## Rules
/// - Can be empty
/// - Must be at most 500 characters
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "observações".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Sale: Add Item                                                         │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantidade deve ser maior que zero"      │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantidade deve estar entre 1 e 999"    │
/// │       │                                                                 │
/// │       └── OK → Proceed with stock check                                │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantidade".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantidade".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (courtesy items)
///
/// ## Example
/// ```rust
/// use balcao_core::money::Money;
/// use balcao_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::NegativeNotAllowed {
            field: "preço".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount amount (sale-level or per-item).
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - May exceed the subtotal; the sale total is floored at zero downstream
pub fn validate_discount(discount: Money) -> ValidationResult<()> {
    if discount.is_negative() {
        return Err(ValidationError::NegativeNotAllowed {
            field: "desconto".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Document Validators
// =============================================================================

/// Validates a fiscal document against the expected kind.
///
/// Empty input is accepted: documents are optional on customers, and this
/// runs only when one was provided.
///
/// ## Example
/// ```rust
/// use balcao_core::document::DocumentKind;
/// use balcao_core::validation::validate_customer_document;
///
/// assert!(validate_customer_document(DocumentKind::Cpf, "111.444.777-35").is_ok());
/// assert!(validate_customer_document(DocumentKind::Cpf, "111.444.777-34").is_err());
/// ```
pub fn validate_customer_document(kind: DocumentKind, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Ok(());
    }

    if !document::is_valid_document(kind, value) {
        return Err(ValidationError::InvalidDocument {
            kind,
            value: value.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
