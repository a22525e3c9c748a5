//! Console app configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults. Read once at startup, then passed around by value.

use std::env;
use std::time::Duration;

use balcao_backend::BackendConfig;

/// Console app configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Simulated latency per backend call, in milliseconds
    pub latency_ms: u64,

    /// Whether to start from the demo dataset
    pub seed_demo_data: bool,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConsoleConfig {
            latency_ms: env::var("BALCAO_LATENCY_MS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BALCAO_LATENCY_MS".to_string()))?,

            seed_demo_data: env::var("BALCAO_SEED_DEMO")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        };

        Ok(config)
    }

    /// The backend configuration this translates to.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new()
            .latency(Duration::from_millis(self.latency_ms))
            .seed_demo_data(self.seed_demo_data)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_conversion() {
        let config = ConsoleConfig {
            latency_ms: 50,
            seed_demo_data: false,
        };

        let backend = config.backend_config();
        assert_eq!(backend.latency, Duration::from_millis(50));
        assert!(!backend.seed_demo_data);
    }
}
