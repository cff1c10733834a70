//! Store connector factory
//!
//! This module provides the factory function that picks a store connector
//! based on configuration.

use crate::adapters::memory::MemoryConnector;
use crate::adapters::postgresql::PostgreSQLConnector;
use crate::adapters::store::traits::StoreConnector;
use crate::config::schema::{SensorHubConfig, StoreTarget};
use crate::domain::{Result, SensorHubError};
use std::sync::Arc;

/// Create a store connector based on the configuration
///
/// Nothing is contacted here; the returned connector connects when the
/// coordinator asks it to.
///
/// # Errors
///
/// Returns an error if the configuration for the selected backend is missing
/// or unusable.
pub fn create_store_connector(config: &SensorHubConfig) -> Result<Arc<dyn StoreConnector>> {
    match config.store.target {
        StoreTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                SensorHubError::Configuration(
                    "postgresql configuration is required when store.target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!(collection = %config.store.collection, "Creating PostgreSQL connector");
            let connector = PostgreSQLConnector::new(
                pg_config.clone(),
                config.store.collection.clone(),
                config.store.connect_timeout(),
            )?;
            Ok(Arc::new(connector))
        }
        StoreTarget::Memory => {
            tracing::info!(collection = %config.store.collection, "Creating in-memory connector");
            Ok(Arc::new(MemoryConnector::new(config.store.collection.clone())))
        }
    }
}
