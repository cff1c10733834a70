//! Domain models and types for sensorhub.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecordId`])
//! - **The stored record model** ([`SensorRecord`])
//! - **Error types** ([`SensorHubError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, SensorHubError>`]. Store
//! failures convert automatically with `?`:
//!
//! ```rust
//! use sensorhub::domain::{Result, StoreError};
//!
//! fn insert() -> std::result::Result<(), StoreError> {
//!     Err(StoreError::Write("duplicate key".to_string()))
//! }
//!
//! fn example() -> Result<()> {
//!     insert()?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{SensorHubError, StoreError};
pub use ids::RecordId;
pub use record::SensorRecord;
pub use result::Result;
