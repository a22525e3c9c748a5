//! # Backend Facade
//!
//! Configuration and entry point for the in-memory backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Backend Facade                                  │
//! │                                                                         │
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendConfig::new() ← Configure latency + seeding                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Backend::new(config) ← Create store (+ demo data)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │              MemoryStore                │                            │
//! │  │   customers  products  sales  moves     │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │ Cloned handle per service                                       │
//! │       ▼                                                                 │
//! │  backend.customers() ──► CustomerService                                │
//! │  backend.products()  ──► ProductService                                 │
//! │  backend.sales()     ──► SaleService                                    │
//! │  backend.dashboard() ──► DashboardService                               │
//! │  (Services can run in parallel; the store lock coordinates them)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Simulated Latency
//! Every service operation starts by sleeping for the configured latency,
//! so the UI layer exercises real pending states during development.
//! Tests use `BackendConfig::instant()` to skip the sleep entirely.

use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::store::MemoryStore;

pub mod customer;
pub mod dashboard;
pub mod product;
pub mod sale;

pub use customer::CustomerService;
pub use dashboard::DashboardService;
pub use product::ProductService;
pub use sale::SaleService;

// =============================================================================
// Configuration
// =============================================================================

/// Backend configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = BackendConfig::new()
///     .latency(Duration::from_millis(150))
///     .seed_demo_data(false);
/// ```
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Artificial delay applied before every operation.
    /// Default: 300 ms (feels like a fast local API)
    pub latency: Duration,

    /// Whether to load the demo dataset on startup.
    /// Default: true
    pub seed_demo_data: bool,
}

impl BackendConfig {
    /// Creates the default development configuration.
    pub fn new() -> Self {
        BackendConfig {
            latency: Duration::from_millis(300),
            seed_demo_data: true,
        }
    }

    /// Sets the simulated latency.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sets whether the demo dataset is loaded on startup.
    pub fn seed_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    /// Creates a zero-latency, empty-store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let backend = Backend::new(BackendConfig::instant());
    /// // Store is isolated and empty, perfect for tests
    /// ```
    pub fn instant() -> Self {
        BackendConfig {
            latency: Duration::ZERO,
            seed_demo_data: false,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::new()
    }
}

// =============================================================================
// Backend
// =============================================================================

/// Main backend handle providing service access.
///
/// ## Usage
/// ```rust,ignore
/// let backend = Backend::new(BackendConfig::new());
/// let page = backend.customers().list(&ListCustomersQuery::default()).await;
/// ```
#[derive(Debug, Clone)]
pub struct Backend {
    store: MemoryStore,
    latency: Duration,
}

impl Backend {
    /// Creates a new backend over a fresh store.
    ///
    /// ## What This Does
    /// 1. Creates an isolated `MemoryStore`
    /// 2. Loads the demo dataset (if enabled)
    /// 3. Remembers the latency every service will simulate
    pub fn new(config: BackendConfig) -> Self {
        info!(
            latency_ms = config.latency.as_millis() as u64,
            seeded = config.seed_demo_data,
            "Initializing backend"
        );

        let store = if config.seed_demo_data {
            MemoryStore::with_demo_data()
        } else {
            MemoryStore::new()
        };

        Backend {
            store,
            latency: config.latency,
        }
    }

    /// Returns a handle to the underlying store.
    ///
    /// ## Usage
    /// For inspection not covered by the services. Prefer service methods
    /// when available.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns the customer service.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let customer = backend.customers().get("some-id").await?;
    /// ```
    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.store.clone(), self.latency)
    }

    /// Returns the product service.
    pub fn products(&self) -> ProductService {
        ProductService::new(self.store.clone(), self.latency)
    }

    /// Returns the sale service.
    pub fn sales(&self) -> SaleService {
        SaleService::new(self.store.clone(), self.latency)
    }

    /// Returns the dashboard service.
    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.store.clone(), self.latency)
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Sleeps for the configured artificial latency, skipping zero outright.
pub(crate) async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        sleep(latency).await;
    }
}

/// Normalizes optional text input: blank strings become `None`.
///
/// Partial updates use this so sending an empty string clears an optional
/// field instead of storing whitespace.
pub(crate) fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = BackendConfig::new()
            .latency(Duration::from_millis(50))
            .seed_demo_data(false);

        assert_eq!(config.latency, Duration::from_millis(50));
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_instant_config() {
        let config = BackendConfig::instant();

        assert!(config.latency.is_zero());
        assert!(!config.seed_demo_data);
    }

    #[tokio::test]
    async fn test_seeded_backend_has_demo_data() {
        let backend = Backend::new(BackendConfig::new().latency(Duration::ZERO));
        let data = backend.store().read().await;

        assert!(!data.customers.is_empty());
        assert!(!data.products.is_empty());
        assert!(!data.sales.is_empty());
    }

    #[tokio::test]
    async fn test_instant_backend_is_empty() {
        let backend = Backend::new(BackendConfig::instant());
        let data = backend.store().read().await;

        assert!(data.customers.is_empty());
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none("  ".to_string()), None);
        assert_eq!(blank_to_none(String::new()), None);
        assert_eq!(blank_to_none("ok".to_string()), Some("ok".to_string()));
    }
}
