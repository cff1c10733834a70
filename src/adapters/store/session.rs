//! Scoped ownership of a connected store
//!
//! [`StoreSession`] is what the coordinator holds between a successful
//! connect and shutdown. `close` takes the session by value, so a store is
//! released at most once; the coordinator calls it on every exit path.

use crate::adapters::store::traits::{RecordStore, StoreResult};
use std::sync::Arc;

/// A connected store awaiting release
pub struct StoreSession {
    store: Arc<dyn RecordStore>,
}

impl StoreSession {
    /// Take ownership of a freshly connected store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Shared handle for scheduled tasks
    pub fn handle(&self) -> Arc<dyn RecordStore> {
        Arc::clone(&self.store)
    }

    /// Borrow the store for setup calls
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Release the store
    ///
    /// Handles cloned out with [`StoreSession::handle`] stay valid as
    /// references, but every operation through them fails after this.
    pub async fn close(self) -> StoreResult<()> {
        let backend = self.store.backend_name().to_string();
        let outstanding = Arc::strong_count(&self.store) - 1;
        if outstanding > 0 {
            tracing::debug!(
                backend = %backend,
                outstanding,
                "Closing store while other handles are still alive"
            );
        }

        let result = self.store.close().await;
        match &result {
            Ok(()) => tracing::info!(backend = %backend, "Store connection closed"),
            Err(e) => tracing::error!(
                backend = %backend,
                kind = e.kind(),
                error = %e,
                "Failed to close store"
            ),
        }
        result
    }
}

impl std::fmt::Debug for StoreSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSession")
            .field("backend", &self.store.backend_name())
            .field("collection", &self.store.collection_name())
            .finish()
    }
}
