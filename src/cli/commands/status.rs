//! Status command implementation
//!
//! This module implements the `status` command, which connects to the
//! configured store and reports how many records it holds.

use crate::adapters::store::{
    create_store_connector, RecordFilter, RecordStore, StoreConnector, StoreSession,
};
use crate::config::load_config;
use crate::domain::errors::StoreError;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Also list up to this many pending records
    #[arg(long, value_name = "N")]
    pub show_pending: Option<usize>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking store status");

        println!("📊 Store Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let connector = match create_store_connector(&config) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Invalid store configuration");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        println!("  Store: {}", connector.address());
        let timeout = config.store.connect_timeout();

        let store = match connect_and_ping(connector.as_ref(), timeout).await {
            Ok(s) => s,
            Err((store, e)) => {
                println!("❌ Failed to reach store");
                println!("   Error: {}", e);
                if let Some(store) = store {
                    let _ = StoreSession::new(store).close().await;
                }
                return Ok(1);
            }
        };
        let session = StoreSession::new(store);

        let code = match self.report(session.store()).await {
            Ok(()) => 0,
            Err(e) => {
                println!("❌ Failed to query store");
                println!("   Error: {}", e);
                1
            }
        };

        let _ = session.close().await;
        Ok(code)
    }

    async fn report(&self, store: &dyn RecordStore) -> Result<(), StoreError> {
        let total = store.count(&RecordFilter::all()).await?;
        let pending = store.count(&RecordFilter::pending()).await?;

        println!("  Collection: {}", store.collection_name());
        println!("  Total records: {total}");
        println!("  Pending records: {pending}");
        println!("  Sent records: {}", total.saturating_sub(pending));

        if let Some(limit) = self.show_pending {
            let records = store.find(&RecordFilter::pending()).await?;
            println!();
            println!("{:<38} {:>9} {:>12}", "ID", "Humidity", "Temperature");
            println!("{}", "-".repeat(61));
            for record in records.iter().take(limit) {
                println!(
                    "{:<38} {:>9} {:>12}",
                    record.id, record.humidity, record.temperature
                );
            }
            if records.len() > limit {
                println!("... and {} more", records.len() - limit);
            }
        }
        println!();
        Ok(())
    }
}

type ConnectFailure = (Option<Arc<dyn RecordStore>>, StoreError);

async fn connect_and_ping(
    connector: &dyn StoreConnector,
    timeout: Duration,
) -> Result<Arc<dyn RecordStore>, ConnectFailure> {
    let store = match tokio::time::timeout(timeout, connector.connect()).await {
        Ok(Ok(store)) => store,
        Ok(Err(e)) => return Err((None, e)),
        Err(_) => {
            return Err((
                None,
                StoreError::Connection(format!("timed out after {}s", timeout.as_secs())),
            ))
        }
    };

    match tokio::time::timeout(timeout, store.ping()).await {
        Ok(Ok(())) => Ok(store),
        Ok(Err(e)) => Err((Some(store), e)),
        Err(_) => Err((
            Some(store),
            StoreError::Unreachable(format!("ping timed out after {}s", timeout.as_secs())),
        )),
    }
}
