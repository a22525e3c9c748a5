//! # Request Status
//!
//! The lifecycle of one async request, as the UI sees it.
//!
//! Every container tracks two of these independently: `loading` for reads
//! (list/get) and `saving` for writes (create/update/delete). A screen can
//! then show a spinner over the table while the save button stays enabled,
//! or the other way around.

use serde::{Deserialize, Serialize};

/// Where an async request currently stands.
///
/// ## State Transitions
/// ```text
/// Idle ──start──► Pending ──ok──► Fulfilled
///                    │
///                    └────err───► Rejected
/// ```
///
/// There is no transition back to `Idle`: once a container has been used,
/// its status reflects the *last* request, which is what the UI wants to
/// render ("loaded", "failed", "still going").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadingStatus {
    /// No request has been made yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request succeeded.
    Fulfilled,
    /// The last request failed; the container's `error` holds the message.
    Rejected,
}

impl LoadingStatus {
    /// True while a request is in flight.
    #[inline]
    pub fn is_pending(self) -> bool {
        self == LoadingStatus::Pending
    }

    /// True once at least one request has completed successfully.
    #[inline]
    pub fn is_fulfilled(self) -> bool {
        self == LoadingStatus::Fulfilled
    }

    /// True when the last request failed.
    #[inline]
    pub fn is_rejected(self) -> bool {
        self == LoadingStatus::Rejected
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(LoadingStatus::default(), LoadingStatus::Idle);
        assert!(!LoadingStatus::default().is_pending());
        assert!(!LoadingStatus::default().is_fulfilled());
        assert!(!LoadingStatus::default().is_rejected());
    }

    #[test]
    fn test_predicates() {
        assert!(LoadingStatus::Pending.is_pending());
        assert!(LoadingStatus::Fulfilled.is_fulfilled());
        assert!(LoadingStatus::Rejected.is_rejected());
        assert!(!LoadingStatus::Fulfilled.is_pending());
    }

    #[test]
    fn test_serializes_camel_case() {
        assert_eq!(
            serde_json::to_value(LoadingStatus::Pending).unwrap(),
            serde_json::json!("pending")
        );
        assert_eq!(
            serde_json::to_value(LoadingStatus::Fulfilled).unwrap(),
            serde_json::json!("fulfilled")
        );
    }
}
