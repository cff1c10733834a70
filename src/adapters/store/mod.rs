//! Store gateway abstraction
//!
//! This module provides a trait-based abstraction for record persistence,
//! allowing sensorhub to work with different store backends (PostgreSQL,
//! in-memory).

pub mod factory;
pub mod filter;
pub mod session;
pub mod traits;

pub use factory::create_store_connector;
pub use filter::RecordFilter;
pub use session::StoreSession;
pub use traits::{RecordStore, StoreConnector, StoreResult};
