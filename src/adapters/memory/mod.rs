//! In-memory store backend
//!
//! Keeps records in a process-local document collection. Used by
//! `store.target = "memory"` runs and by tests.

pub mod store;

pub use store::{MemoryConnector, MemoryRecordStore};
