//! Store gateway traits
//!
//! This module defines the traits that store backends must implement
//! to work with sensorhub.

use crate::adapters::store::filter::RecordFilter;
use crate::domain::errors::StoreError;
use crate::domain::record::SensorRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for store gateway operations
///
/// Store calls keep their narrow error type so callers can tell fatal setup
/// failures from per-tick ones.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Document store client for sensor records
///
/// A single handle is shared by every scheduled task. Implementations must
/// tolerate concurrent calls from independent tasks; no caller adds locking.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Liveness check, performed once after connecting
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unreachable`] if the backend does not answer.
    async fn ping(&self) -> StoreResult<()>;

    /// Ensure the backing collection exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the collection cannot be created.
    async fn ensure_collection(&self) -> StoreResult<()>;

    /// Persist one record
    ///
    /// No uniqueness pre-check is made; a duplicate id is rejected by the
    /// backend itself.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the record is not persisted.
    async fn insert(&self, record: &SensorRecord) -> StoreResult<()>;

    /// Count records matching `filter`; an empty filter counts everything
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the count fails.
    async fn count(&self, filter: &RecordFilter) -> StoreResult<u64>;

    /// Fetch every record matching `filter`, fully materialized
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the query fails or a stored document
    /// does not decode into a [`SensorRecord`].
    async fn find(&self, filter: &RecordFilter) -> StoreResult<Vec<SensorRecord>>;

    /// Release the connection pool
    ///
    /// Callers go through [`crate::adapters::store::StoreSession`], which
    /// makes this a once-only operation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disconnect`] if the release fails.
    async fn close(&self) -> StoreResult<()>;

    /// Backend name used in log fields (e.g. "postgresql")
    fn backend_name(&self) -> &str;

    /// Name of the collection records are written to
    fn collection_name(&self) -> &str;
}

/// Establishes a [`RecordStore`] handle
///
/// Connecting is separate from the store trait so a coordinator can be handed
/// a connector up front and decide itself when, and under which timeout, to
/// connect.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Build the connection pool and return a shareable handle
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the pool cannot be created.
    async fn connect(&self) -> StoreResult<Arc<dyn RecordStore>>;

    /// Address of the store with credentials removed, for logging
    fn address(&self) -> String;
}
