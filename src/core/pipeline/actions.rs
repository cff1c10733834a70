//! Producer, Counter and Finder actions

use crate::adapters::store::{RecordFilter, RecordStore};
use crate::core::scheduler::TaskAction;
use crate::domain::record::SensorRecord;
use crate::domain::Result;
use crate::log_store_operation;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Generates one record per tick and inserts it
pub struct ProduceRecord {
    store: Arc<dyn RecordStore>,
}

impl ProduceRecord {
    /// Create a producer writing to `store`
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaskAction for ProduceRecord {
    async fn run(&self, _cancel: &CancellationToken) -> Result<()> {
        let record = SensorRecord::generate();
        let started = Instant::now();
        self.store.insert(&record).await?;

        log_store_operation!(
            "insert",
            started.elapsed(),
            id = %record.id,
            humidity = record.humidity,
            temperature = record.temperature
        );
        tracing::info!("data {record}");
        Ok(())
    }
}

/// Counts every record in the collection
pub struct CountRecords {
    store: Arc<dyn RecordStore>,
    last_count: AtomicU64,
}

impl CountRecords {
    /// Create a counter over `store`
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            last_count: AtomicU64::new(0),
        }
    }

    /// Result of the most recent successful count
    pub fn last_count(&self) -> u64 {
        self.last_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskAction for CountRecords {
    async fn run(&self, _cancel: &CancellationToken) -> Result<()> {
        let started = Instant::now();
        let total = self.store.count(&RecordFilter::all()).await?;

        let previous = self.last_count.swap(total, Ordering::SeqCst);
        if total < previous {
            // Records are never deleted by this process.
            tracing::warn!(previous, total, "Record count went down");
        }
        log_store_operation!("count", started.elapsed(), total);
        Ok(())
    }
}

/// Lists the records that have not been sent yet
pub struct FindPending {
    store: Arc<dyn RecordStore>,
    last_found: AtomicU64,
}

impl FindPending {
    /// Create a finder over `store`
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            last_found: AtomicU64::new(0),
        }
    }

    /// Number of pending records seen by the most recent successful run
    pub fn last_found(&self) -> u64 {
        self.last_found.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskAction for FindPending {
    async fn run(&self, cancel: &CancellationToken) -> Result<()> {
        let started = Instant::now();
        let pending = self.store.find(&RecordFilter::pending()).await?;
        self.last_found.store(pending.len() as u64, Ordering::SeqCst);

        log_store_operation!("find", started.elapsed(), pending = pending.len() as u64);
        for record in &pending {
            if cancel.is_cancelled() {
                break;
            }
            tracing::debug!(id = %record.id, "pending {record}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryRecordStore;
    use crate::domain::{SensorHubError, StoreError};

    fn memory() -> (Arc<MemoryRecordStore>, Arc<dyn RecordStore>) {
        let store = Arc::new(MemoryRecordStore::new("sensor"));
        let handle: Arc<dyn RecordStore> = store.clone();
        (store, handle)
    }

    #[tokio::test]
    async fn test_producer_inserts_pending_record() {
        let (store, handle) = memory();
        let producer = ProduceRecord::new(handle);
        let token = CancellationToken::new();

        producer.run(&token).await.unwrap();
        producer.run(&token).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(store.count(&RecordFilter::pending()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_counter_tracks_total() {
        let (store, handle) = memory();
        let counter = CountRecords::new(handle);
        let token = CancellationToken::new();

        counter.run(&token).await.unwrap();
        assert_eq!(counter.last_count(), 0);

        store.insert(&SensorRecord::generate()).await.unwrap();
        store.insert(&SensorRecord::generate()).await.unwrap();
        counter.run(&token).await.unwrap();
        assert_eq!(counter.last_count(), 2);
    }

    #[tokio::test]
    async fn test_finder_sees_only_pending() {
        let (store, handle) = memory();
        let mut sent = SensorRecord::generate();
        sent.sent = true;
        store.insert(&sent).await.unwrap();
        store.insert(&SensorRecord::generate()).await.unwrap();

        let finder = FindPending::new(handle);
        finder.run(&CancellationToken::new()).await.unwrap();
        assert_eq!(finder.last_found(), 1);
    }

    #[tokio::test]
    async fn test_store_errors_surface_as_store_variant() {
        let (store, handle) = memory();
        store.close().await.unwrap();

        let err = ProduceRecord::new(handle.clone())
            .run(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SensorHubError::Store(StoreError::Write(_))));

        let err = CountRecords::new(handle)
            .run(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SensorHubError::Store(StoreError::Query(_))));
    }
}
