//! Configuration management for sensorhub.
//!
//! TOML-based configuration with `${VAR_NAME}` substitution, `SENSORHUB_*`
//! environment overrides, defaults for every optional setting, and validation
//! on load.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! target = "postgresql"
//! connect_timeout_seconds = 5
//! collection = "sensor"
//!
//! [postgresql]
//! connection_string = "${SENSORHUB_PG_URI}"
//! max_connections = 5
//!
//! [pipeline]
//! variant = "sensor"
//! producer_interval_ms = 3000
//! counter_interval_ms = 5000
//! finder_interval_ms = 5000
//! ```
//!
//! ```rust,no_run
//! use sensorhub::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sensorhub.toml")?;
//! println!("Collection: {}", config.store.collection);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, LoggingConfig, PipelineConfig, PipelineVariant, PostgreSQLConfig,
    SensorHubConfig, StoreConfig, StoreTarget,
};
pub use secret::{redact_connection_string, secret_string, SecretString, SecretValue};
