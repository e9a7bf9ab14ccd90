//! Debounced auto-save
//!
//! A content edit arms a timer; every subsequent edit cancels and rearms
//! it. Only when edits stop for the full quiet window does a save fire,
//! which bounds write amplification on the persistence layer during
//! active typing.
//!
//! The owning component must drop (or `cancel`) the autosaver on
//! teardown so a stale write cannot land after navigation away; dropping
//! aborts any pending timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::Library;
use crate::storage::LibraryPersistence;

/// Default quiet window before a save fires
pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(5);

/// Debounced snapshot writer
pub struct Autosaver {
    persistence: Arc<LibraryPersistence>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Autosaver {
    /// Create an autosaver with the default 5-second quiet window
    pub fn new(persistence: LibraryPersistence) -> Self {
        Self {
            persistence: Arc::new(persistence),
            delay: AUTOSAVE_DELAY,
            pending: None,
        }
    }

    /// Override the quiet window (mainly for tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Whether a save is currently armed
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Arm (or rearm) the timer with the latest snapshot
    ///
    /// Any previously pending save is cancelled; only the snapshot from
    /// the last call before the quiet window elapses gets written. Save
    /// failures are swallowed by the persistence layer.
    pub fn schedule(&mut self, snapshot: Library) {
        self.cancel();

        let persistence = Arc::clone(&self.persistence);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("Autosave quiet window elapsed, writing snapshot");
            persistence.save(&snapshot);
        }));
    }

    /// Cancel any pending save
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.cancel();
    }
}
