//! Store backends for sensorhub.
//!
//! - [`store`] - Store gateway abstraction (trait-based) and connector factory
//! - [`postgresql`] - PostgreSQL implementation (JSONB documents)
//! - [`memory`] - Process-local implementation
//!
//! # Design Pattern
//!
//! Adapters isolate storage technology behind the [`store::RecordStore`] and
//! [`store::StoreConnector`] traits, so the coordinator and its tasks can be
//! tested against mock implementations.
//!
//! ```rust
//! use sensorhub::adapters::store::{create_store_connector, RecordFilter};
//! use sensorhub::config::SensorHubConfig;
//! use sensorhub::domain::SensorRecord;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = create_store_connector(&SensorHubConfig::in_memory())?;
//! let store = connector.connect().await?;
//! store.insert(&SensorRecord::generate()).await?;
//! assert_eq!(store.count(&RecordFilter::pending()).await?, 1);
//! store.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod postgresql;
pub mod store;
