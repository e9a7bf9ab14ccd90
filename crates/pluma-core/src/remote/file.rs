//! File-backed Remote Store
//!
//! Keeps the public collection in one JSON file at a shared path (a
//! network drive or drop directory stands in for the hosted database).
//! Writes are atomic; change events are delivered in-process over a
//! broadcast channel.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use super::{ChangeEvent, RemoteError, RemoteStore};
use crate::models::PublishedRecord;
use crate::storage::persistence::atomic_write;

/// Capacity of the change-event channel
const EVENT_CAPACITY: usize = 64;

/// Remote Store backed by a single JSON file
pub struct FileRemote {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file
    write_lock: Mutex<()>,
    events: broadcast::Sender<ChangeEvent>,
}

impl FileRemote {
    /// Create a remote over the given file path
    ///
    /// The file is created on first upsert; a missing file reads as an
    /// empty collection.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            events,
        }
    }

    /// The backing file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<PublishedRecord>, RemoteError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| RemoteError::Unavailable(format!("{:?}: {}", self.path, e)))?;

        let records = serde_json::from_str(&content)?;
        Ok(records)
    }

    fn write_records(&self, records: &[PublishedRecord]) -> Result<(), RemoteError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        atomic_write(&self.path, &bytes)
            .map_err(|e| RemoteError::Unavailable(format!("{:?}: {}", self.path, e)))?;
        Ok(())
    }

    fn emit(&self, event: ChangeEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl RemoteStore for FileRemote {
    async fn upsert(&self, record: &PublishedRecord) -> Result<(), RemoteError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records()?;
        let event = match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                ChangeEvent::Updated(record.id.clone())
            }
            None => {
                records.push(record.clone());
                ChangeEvent::Inserted(record.id.clone())
            }
        };

        self.write_records(&records)?;
        debug!("Upserted published record {}", record.id);
        self.emit(event);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() != before {
            self.write_records(&records)?;
            debug!("Deleted published record {}", id);
            self.emit(ChangeEvent::Removed(id.to_string()));
        }
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<PublishedRecord>, RemoteError> {
        let mut records = self.read_records()?;
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }
}
