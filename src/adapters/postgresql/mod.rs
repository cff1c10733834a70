//! PostgreSQL store backend
//!
//! This module stores sensor records as JSONB documents in PostgreSQL.

pub mod adapter;
pub mod client;

pub use adapter::{PostgreSQLConnector, PostgreSQLRecordStore};
pub use client::PostgreSQLClient;
