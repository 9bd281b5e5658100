//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MODE_ROUTER` prefix and nested values are separated by double underscores.
//! Every section has defaults, so an empty environment yields a runnable config.
//!
//! # Example
//!
//! ```no_run
//! use mode_router::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod metrics;
mod routing;
mod server;

pub use error::{ConfigError, ValidationError};
pub use metrics::MetricsConfig;
pub use routing::RoutingConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Routing engine thresholds, weights and learning rates
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Metrics history configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MODE_ROUTER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MODE_ROUTER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MODE_ROUTER__ROUTING__THRESHOLDS__FIELD_THRESHOLD=0.65`
    ///   -> `routing.thresholds.field_threshold = 0.65`
    /// - `MODE_ROUTER__METRICS__CAPACITY=5000` -> `metrics.capacity = 5000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MODE_ROUTER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.routing.validate()?;
        self.metrics.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MODE_ROUTER__SERVER__PORT",
        "MODE_ROUTER__SERVER__ENVIRONMENT",
        "MODE_ROUTER__SERVER__JSON_LOGS",
        "MODE_ROUTER__ROUTING__THRESHOLDS__FIELD_THRESHOLD",
        "MODE_ROUTER__ROUTING__WEIGHTS__NEW_USER",
        "MODE_ROUTER__ROUTING__CONTEXT__SUCCESS_ALPHA",
        "MODE_ROUTER__METRICS__CAPACITY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.metrics.capacity, 1000);
        assert_eq!(config.routing.thresholds.field_threshold, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MODE_ROUTER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_nested_routing_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MODE_ROUTER__ROUTING__THRESHOLDS__FIELD_THRESHOLD", "0.65");
        env::set_var("MODE_ROUTER__ROUTING__WEIGHTS__NEW_USER", "0.3");
        env::set_var("MODE_ROUTER__ROUTING__CONTEXT__SUCCESS_ALPHA", "0.1");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.routing.thresholds.field_threshold, 0.65);
        assert_eq!(config.routing.thresholds.hybrid_threshold, 0.4);
        assert_eq!(config.routing.weights.new_user, 0.3);
        assert_eq!(config.routing.context.success_alpha, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_port_and_capacity() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MODE_ROUTER__SERVER__PORT", "3000");
        env::set_var("MODE_ROUTER__METRICS__CAPACITY", "50");
        env::set_var("MODE_ROUTER__SERVER__JSON_LOGS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.metrics.capacity, 50);
        assert!(config.server.json_logs);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MODE_ROUTER__METRICS__CAPACITY", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMetricsCapacity)
        ));
    }
}
