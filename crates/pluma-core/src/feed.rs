//! Remote feed reader
//!
//! Maintains a read-only cache of all published records for browsing.
//! The cache is only ever replaced wholesale, after a fetch fully
//! completes, so overlapping refreshes can never leave a torn mix of two
//! fetches; the last completed fetch wins. A failed fetch leaves the
//! cache at its last-known-good value.
//!
//! Subscription trades bandwidth for simplicity: any insert, update, or
//! delete on the public collection triggers a full refresh rather than an
//! incremental patch. Record counts are assumed small.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::PublishedRecord;
use crate::remote::{RemoteError, RemoteStore};

/// Cached, queryable view of the public collection
pub struct FeedReader {
    remote: Arc<dyn RemoteStore>,
    cache: Arc<RwLock<Vec<PublishedRecord>>>,
    watcher: Option<JoinHandle<()>>,
}

impl FeedReader {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            remote,
            cache: Arc::new(RwLock::new(Vec::new())),
            watcher: None,
        }
    }

    /// The current cached records, newest first
    pub async fn records(&self) -> Vec<PublishedRecord> {
        self.cache.read().await.clone()
    }

    /// Fetch the full collection and replace the cache
    ///
    /// On failure the cache keeps its last-known-good value and the error
    /// is returned for the boundary to display.
    pub async fn refresh(&self) -> Result<Vec<PublishedRecord>, RemoteError> {
        let records = self.remote.fetch_all().await?;
        *self.cache.write().await = records.clone();
        Ok(records)
    }

    /// Start watching the remote change stream
    ///
    /// Any change event triggers a full refresh. Calling this again
    /// replaces the previous watcher.
    pub fn subscribe(&mut self) {
        self.unsubscribe();

        let mut events = self.remote.subscribe();
        let remote = Arc::clone(&self.remote);
        let cache = Arc::clone(&self.cache);

        self.watcher = Some(tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        debug!("Feed change event: {:?}, refreshing", event);
                        match remote.fetch_all().await {
                            Ok(records) => *cache.write().await = records,
                            Err(e) => warn!("Feed refresh failed, keeping cache: {}", e),
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        // Missed events still end in a full refresh next round
                        debug!("Feed watcher lagged by {} events", skipped);
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }));
    }

    /// Whether a watcher task is currently registered
    pub fn is_subscribed(&self) -> bool {
        self.watcher.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop watching the change stream
    ///
    /// Idempotent; safe without a prior subscribe.
    pub fn unsubscribe(&mut self) {
        if let Some(handle) = self.watcher.take() {
            handle.abort();
        }
    }
}

impl Drop for FeedReader {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
