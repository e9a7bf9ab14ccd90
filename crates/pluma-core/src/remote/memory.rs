//! In-memory Remote Store
//!
//! Backend for tests and demos. Holds the collection in memory and can be
//! toggled unavailable to exercise failure paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};

use super::{ChangeEvent, RemoteError, RemoteStore};
use crate::models::PublishedRecord;

/// Capacity of the change-event channel
const EVENT_CAPACITY: usize = 64;

/// Remote Store held entirely in memory
pub struct MemoryRemote {
    records: Mutex<Vec<PublishedRecord>>,
    unavailable: AtomicBool,
    events: broadcast::Sender<ChangeEvent>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            records: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
            events,
        }
    }

    /// Make every subsequent operation fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RemoteError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(RemoteError::Unavailable("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }

    fn emit(&self, event: ChangeEvent) {
        let _ = self.events.send(event);
    }
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    async fn upsert(&self, record: &PublishedRecord) -> Result<(), RemoteError> {
        self.check_available()?;

        let mut records = self.records.lock().await;
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
        drop(records);

        self.emit(event);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.check_available()?;

        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;
        drop(records);

        if removed {
            self.emit(ChangeEvent::Removed(id.to_string()));
        }
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<PublishedRecord>, RemoteError> {
        self.check_available()?;

        let mut records = self.records.lock().await.clone();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Story;

    fn record(title: &str) -> PublishedRecord {
        PublishedRecord::from_story(&Story::new(title), "Ana").unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_fetch() {
        let remote = MemoryRemote::new();
        let rec = record("Untitled");

        remote.upsert(&rec).await.unwrap();
        let all = remote.fetch_all().await.unwrap();
        assert_eq!(all, vec![rec]);
    }

    #[tokio::test]
    async fn test_unavailable_fails_everything() {
        let remote = MemoryRemote::new();
        let rec = record("Untitled");
        remote.upsert(&rec).await.unwrap();

        remote.set_unavailable(true);
        assert!(remote.upsert(&rec).await.is_err());
        assert!(remote.delete(&rec.id).await.is_err());
        assert!(remote.fetch_all().await.is_err());

        remote.set_unavailable(false);
        assert_eq!(remote.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_change_events() {
        let remote = MemoryRemote::new();
        let mut rx = remote.subscribe();
        let rec = record("Untitled");

        remote.upsert(&rec).await.unwrap();
        remote.delete(&rec.id).await.unwrap();
        // Deleting an absent id emits nothing
        remote.delete(&rec.id).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), ChangeEvent::Inserted(rec.id.clone()));
        assert_eq!(rx.recv().await.unwrap(), ChangeEvent::Removed(rec.id.clone()));
        assert!(rx.try_recv().is_err());
    }
}
