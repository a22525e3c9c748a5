//! # Backend Error Types
//!
//! Error types for backend operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (balcao-core)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendError (this module) ← Adds NotFound / stock / conflict cases   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiEnvelope (envelope.rs) ← {status, data, error} for the frontend    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays the message as-is                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Message Language
//! `Display` strings are what the UI shows, so they are in Portuguese, same
//! wording the screens have always used. Log fields stay in English.

use std::fmt;

use thiserror::Error;

use balcao_core::ValidationError;

// =============================================================================
// Entity
// =============================================================================

/// The entity a backend operation was addressing.
///
/// Carried inside [`BackendError::NotFound`] so logs can categorize misses
/// without parsing the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Customer,
    Product,
    Sale,
}

impl Entity {
    /// User-facing "not found" phrase, grammatical gender included.
    fn not_found_phrase(self) -> &'static str {
        match self {
            Entity::Customer => "Cliente não encontrado",
            Entity::Product => "Produto não encontrado",
            Entity::Sale => "Venda não encontrada",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Customer => "customer",
            Entity::Product => "product",
            Entity::Sale => "sale",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Backend Error
// =============================================================================

/// Backend operation errors.
///
/// Every failure a service can produce, categorized so the envelope layer
/// can translate it into an HTTP-like status code.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Entity not found by id.
    #[error("{}", .entity.not_found_phrase())]
    NotFound { entity: Entity, id: String },

    /// Input failed a business rule from balcao-core.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A sale asked for more units than the product has on hand.
    ///
    /// The whole operation is rejected; no stock was touched.
    #[error("Estoque insuficiente para o produto {product}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// A sale item references a product id that does not exist.
    #[error("Item da venda referencia um produto inexistente")]
    UnknownSaleItemProduct { id: String },

    /// Cancel requested on a sale that is already canceled.
    #[error("Venda já cancelada")]
    AlreadyCanceled { code: String },

    /// Edit or delete-with-restock requested on a canceled sale.
    #[error("Venda cancelada não pode ser alterada")]
    CanceledImmutable { code: String },

    /// An update tried to set the status to canceled directly.
    #[error("Para cancelar a venda, use a operação de cancelamento")]
    CancelViaEdit { code: String },
}

/// Error categories, mapped to HTTP-like status codes by the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing entity (404).
    NotFound,
    /// Invalid input or business rule violation (400).
    Validation,
    /// Operation conflicts with the entity's current state (409).
    Conflict,
}

impl BackendError {
    /// Creates a NotFound error for a given entity and id.
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        BackendError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates an InsufficientStock error.
    pub fn insufficient_stock(
        product: impl Into<String>,
        available: i64,
        requested: i64,
    ) -> Self {
        BackendError::InsufficientStock {
            product: product.into(),
            available,
            requested,
        }
    }

    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::NotFound { .. } => ErrorKind::NotFound,
            BackendError::Validation(_)
            | BackendError::InsufficientStock { .. }
            | BackendError::UnknownSaleItemProduct { .. }
            | BackendError::CancelViaEdit { .. } => ErrorKind::Validation,
            BackendError::AlreadyCanceled { .. } | BackendError::CanceledImmutable { .. } => {
                ErrorKind::Conflict
            }
        }
    }

    /// HTTP-like status code for the response envelope.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::Validation => 400,
            ErrorKind::Conflict => 409,
        }
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_are_gendered() {
        let customer = BackendError::not_found(Entity::Customer, "c1");
        assert_eq!(customer.to_string(), "Cliente não encontrado");
        let sale = BackendError::not_found(Entity::Sale, "s1");
        assert_eq!(sale.to_string(), "Venda não encontrada");
    }

    #[test]
    fn test_status_codes_follow_kind() {
        assert_eq!(BackendError::not_found(Entity::Product, "p1").status_code(), 404);
        assert_eq!(
            BackendError::insufficient_stock("Mouse", 2, 5).status_code(),
            400
        );
        let conflict = BackendError::AlreadyCanceled {
            code: "VND-001".to_string(),
        };
        assert_eq!(conflict.status_code(), 409);
        assert_eq!(conflict.to_string(), "Venda já cancelada");
    }

    #[test]
    fn test_validation_errors_pass_their_message_through() {
        let err = BackendError::from(ValidationError::Required {
            field: "nome".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "nome é obrigatório");
    }
}
