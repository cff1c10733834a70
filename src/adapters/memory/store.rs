//! Process-local document collection
//!
//! Documents are kept as `serde_json::Value` in insertion order and filtered
//! with the same containment rule the PostgreSQL backend applies through
//! JSONB `@>`. Concurrent access goes through a tokio `RwLock`.

use crate::adapters::store::filter::RecordFilter;
use crate::adapters::store::traits::{RecordStore, StoreConnector, StoreResult};
use crate::domain::errors::StoreError;
use crate::domain::record::SensorRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collection {
    documents: Vec<Value>,
    ids: HashSet<String>,
}

/// In-memory implementation of [`RecordStore`]
pub struct MemoryRecordStore {
    collection_name: String,
    collection: RwLock<Collection>,
    closed: AtomicBool,
}

impl MemoryRecordStore {
    /// Create an empty collection
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            collection: RwLock::new(Collection::default()),
            closed: AtomicBool::new(false),
        }
    }

    /// Store a raw document, bypassing the typed record path
    ///
    /// Lets callers seed documents written by other producers, including ones
    /// that do not decode as [`SensorRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the document has no string `_id`, the
    /// id is already present, or the store is closed.
    pub async fn insert_document(&self, document: Value) -> StoreResult<()> {
        if self.is_closed() {
            return Err(StoreError::Write("store is closed".to_string()));
        }

        let id = document
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Write("document has no string _id".to_string()))?
            .to_string();

        let mut collection = self.collection.write().await;
        if !collection.ids.insert(id.clone()) {
            return Err(StoreError::Write(format!(
                "duplicate key: _id '{id}' already exists in {}",
                self.collection_name
            )));
        }
        collection.documents.push(document);
        Ok(())
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.collection.read().await.documents.len()
    }

    /// Whether the collection is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Whether [`RecordStore::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open_for_query(&self) -> StoreResult<()> {
        if self.is_closed() {
            return Err(StoreError::Query("store is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn ping(&self) -> StoreResult<()> {
        if self.is_closed() {
            return Err(StoreError::Unreachable("store is closed".to_string()));
        }
        Ok(())
    }

    async fn ensure_collection(&self) -> StoreResult<()> {
        if self.is_closed() {
            return Err(StoreError::Write("store is closed".to_string()));
        }
        Ok(())
    }

    async fn insert(&self, record: &SensorRecord) -> StoreResult<()> {
        self.insert_document(record.to_document()).await
    }

    async fn count(&self, filter: &RecordFilter) -> StoreResult<u64> {
        self.ensure_open_for_query()?;
        let collection = self.collection.read().await;
        let count = collection
            .documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .count();
        Ok(count as u64)
    }

    async fn find(&self, filter: &RecordFilter) -> StoreResult<Vec<SensorRecord>> {
        self.ensure_open_for_query()?;
        let collection = self.collection.read().await;
        collection
            .documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .map(|doc| {
                SensorRecord::from_document(doc.clone()).map_err(|e| {
                    StoreError::Query(format!("failed to decode sensor record: {e}"))
                })
            })
            .collect()
    }

    async fn close(&self) -> StoreResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(StoreError::Disconnect("store already closed".to_string()));
        }
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }

    fn collection_name(&self) -> &str {
        &self.collection_name
    }
}

/// Connector handing out one shared in-memory collection
#[derive(Clone)]
pub struct MemoryConnector {
    store: Arc<MemoryRecordStore>,
}

impl MemoryConnector {
    /// Connector over a new, empty collection
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self::with_store(Arc::new(MemoryRecordStore::new(collection_name)))
    }

    /// Connector over an existing collection, so callers can inspect it afterwards
    pub fn with_store(store: Arc<MemoryRecordStore>) -> Self {
        Self { store }
    }

    /// The collection this connector hands out
    pub fn store(&self) -> Arc<MemoryRecordStore> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl StoreConnector for MemoryConnector {
    async fn connect(&self) -> StoreResult<Arc<dyn RecordStore>> {
        if self.store.is_closed() {
            return Err(StoreError::Connection(
                "in-memory collection was already closed".to_string(),
            ));
        }
        Ok(Arc::clone(&self.store) as Arc<dyn RecordStore>)
    }

    fn address(&self) -> String {
        format!("memory://{}", self.store.collection_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::RecordId;
    use serde_json::json;

    fn record(id: &str, sent: bool) -> SensorRecord {
        SensorRecord {
            id: RecordId::new(id).unwrap(),
            humidity: 50,
            temperature: 20,
            sent,
        }
    }

    #[tokio::test]
    async fn test_insert_and_count() {
        let store = MemoryRecordStore::new("sensor");
        store.insert(&record("a", false)).await.unwrap();
        store.insert(&record("b", true)).await.unwrap();

        assert_eq!(store.count(&RecordFilter::all()).await.unwrap(), 2);
        assert_eq!(store.count(&RecordFilter::pending()).await.unwrap(), 1);
        assert_eq!(store.count(&RecordFilter::sent(true)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_write_error() {
        let store = MemoryRecordStore::new("sensor");
        store.insert(&record("a", false)).await.unwrap();

        let err = store.insert(&record("a", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::Write(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_returns_typed_records_in_insertion_order() {
        let store = MemoryRecordStore::new("sensor");
        store.insert(&record("a", false)).await.unwrap();
        store.insert(&record("b", true)).await.unwrap();
        store.insert(&record("c", false)).await.unwrap();

        let pending = store.find(&RecordFilter::pending()).await.unwrap();
        let ids: Vec<&str> = pending.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_find_decode_failure_is_query_error() {
        let store = MemoryRecordStore::new("sensor");
        store
            .insert_document(json!({"_id": "x", "humidity": "wet", "hasSent": false}))
            .await
            .unwrap();

        let err = store.find(&RecordFilter::pending()).await.unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
        // Counting does not decode, so it still works
        assert_eq!(store.count(&RecordFilter::all()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_string_flag_is_not_pending() {
        let store = MemoryRecordStore::new("sensor");
        store
            .insert_document(json!({"_id": "x", "humidity": 1, "temp": 1, "hasSent": "false"}))
            .await
            .unwrap();
        assert_eq!(store.count(&RecordFilter::pending()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let store = MemoryRecordStore::new("sensor");
        store.close().await.unwrap();

        assert!(matches!(
            store.ping().await.unwrap_err(),
            StoreError::Unreachable(_)
        ));
        assert!(matches!(
            store.insert(&record("a", false)).await.unwrap_err(),
            StoreError::Write(_)
        ));
        assert!(matches!(
            store.count(&RecordFilter::all()).await.unwrap_err(),
            StoreError::Query(_)
        ));
        assert!(matches!(
            store.close().await.unwrap_err(),
            StoreError::Disconnect(_)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let store = Arc::new(MemoryRecordStore::new("sensor"));
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    store.insert(&SensorRecord::generate()).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.count(&RecordFilter::all()).await.unwrap(), 400);
    }

    #[tokio::test]
    async fn test_connector_shares_collection() {
        let connector = MemoryConnector::new("sensor");
        let handle = connector.connect().await.unwrap();
        handle.insert(&record("a", false)).await.unwrap();

        assert_eq!(connector.store().len().await, 1);
        assert_eq!(connector.address(), "memory://sensor");

        handle.close().await.unwrap();
        assert!(matches!(
            connector.connect().await.err(),
            Some(StoreError::Connection(_))
        ));
    }
}
