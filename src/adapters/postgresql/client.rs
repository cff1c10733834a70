//! PostgreSQL client implementation
//!
//! This module owns the deadpool connection pool and the SQL round trips the
//! record store needs. Errors come back as [`StoreError`] so the caller picks
//! the category per operation.

use crate::adapters::store::traits::StoreResult;
use crate::config::schema::PostgreSQLConfig;
use crate::domain::errors::StoreError;
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod, Runtime};
use std::time::Duration;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

const MIGRATION_SQL: &str = include_str!("../../../migrations/001_initial_schema.sql");

/// Pooled PostgreSQL client for one collection table
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Table backing the collection
    table: String,
}

impl PostgreSQLClient {
    /// Build the connection pool
    ///
    /// No connection is opened here; deadpool creates them lazily.
    ///
    /// # Arguments
    ///
    /// * `pg_config` - Parsed connection settings
    /// * `config` - Pool and statement settings
    /// * `table` - Collection table name, already validated as an identifier
    /// * `connect_timeout` - Bound for establishing a single connection
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the pool cannot be built.
    pub fn new(
        mut pg_config: tokio_postgres::Config,
        config: &PostgreSQLConfig,
        table: String,
        connect_timeout: Duration,
    ) -> StoreResult<Self> {
        pg_config.connect_timeout(connect_timeout);
        apply_session_options(&mut pg_config, config.statement_timeout_seconds);

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .wait_timeout(Some(connect_timeout))
            .create_timeout(Some(connect_timeout))
            .recycle_timeout(Some(connect_timeout))
            .build()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection pool: {e}")))?;

        Ok(Self { pool, table })
    }

    /// Open the first pooled connection
    pub async fn establish(&self) -> StoreResult<()> {
        self.pool
            .get()
            .await
            .map(drop)
            .map_err(|e| StoreError::Connection(format!("Failed to connect to PostgreSQL: {e}")))
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> StoreResult<()> {
        let client = self.get_connection(StoreError::Unreachable).await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| StoreError::Unreachable(format!("Connection test failed: {e}")))?;

        tracing::debug!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Create the collection table and its indexes if missing
    pub async fn ensure_table_exists(&self) -> StoreResult<()> {
        let client = self.get_connection(StoreError::Write).await?;
        let migration_sql = MIGRATION_SQL.replace("{{collection}}", &self.table);

        client
            .batch_execute(&migration_sql)
            .await
            .map_err(|e| StoreError::Write(format!("Failed to execute migration: {e}")))?;

        tracing::info!(table = %self.table, "PostgreSQL schema initialized successfully");
        Ok(())
    }

    /// Table backing the collection
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Get a connection from the pool
    ///
    /// `kind` maps pool failures into the caller's error category.
    pub async fn get_connection(&self, kind: fn(String) -> StoreError) -> StoreResult<Object> {
        self.pool
            .get()
            .await
            .map_err(|e| kind(format!("Failed to get connection from pool: {e}")))
    }

    /// Execute a query and return rows
    pub async fn query(
        &self,
        query: &str,
        params: &[&(dyn ToSql + Sync)],
        kind: fn(String) -> StoreError,
    ) -> StoreResult<Vec<Row>> {
        let client = self.get_connection(kind).await?;
        client
            .query(query, params)
            .await
            .map_err(|e| kind(format!("Query failed: {e}")))
    }

    /// Execute a query that yields exactly one row
    pub async fn query_one(
        &self,
        query: &str,
        params: &[&(dyn ToSql + Sync)],
        kind: fn(String) -> StoreError,
    ) -> StoreResult<Row> {
        let client = self.get_connection(kind).await?;
        client
            .query_one(query, params)
            .await
            .map_err(|e| kind(format!("Query failed: {e}")))
    }

    /// Execute a statement and return the number of affected rows
    pub async fn execute(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
        kind: fn(String) -> StoreError,
    ) -> StoreResult<u64> {
        let client = self.get_connection(kind).await?;
        client
            .execute(statement, params)
            .await
            .map_err(|e| kind(format!("Statement execution failed: {e}")))
    }

    /// Close the pool
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disconnect`] if the pool was already closed.
    pub fn close(&self) -> StoreResult<()> {
        if self.pool.is_closed() {
            return Err(StoreError::Disconnect("pool already closed".to_string()));
        }
        self.pool.close();
        Ok(())
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

/// Set the statement timeout as a startup option
///
/// The server applies it once when each connection opens, so a checkout costs
/// no extra round trip. Replaces any `options` from the connection string.
fn apply_session_options(
    pg_config: &mut tokio_postgres::Config,
    statement_timeout_seconds: u64,
) {
    let timeout_ms = statement_timeout_seconds.saturating_mul(1000);
    pg_config.options(&format!("-c statement_timeout={timeout_ms}"));
}
