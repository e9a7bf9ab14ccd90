//! Remote Store seam
//!
//! The Remote Store is an external collaborator: a document collection of
//! published records supporting upsert-by-id, delete-by-id, ordered
//! full-scan query, and a change-event subscription. The core only talks
//! to it through the [`RemoteStore`] trait.
//!
//! Backends:
//! - [`FileRemote`] - a shared JSON file standing in for the hosted
//!   collection, used by the CLI.
//! - [`MemoryRemote`] - in-memory backend with a failure toggle, for
//!   tests and demos.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::models::PublishedRecord;

pub use file::FileRemote;
pub use memory::MemoryRemote;

/// Errors from the Remote Store
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("remote store unavailable: {0}")]
    Unavailable(String),

    #[error("remote record malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A change notification from the public collection
///
/// Carries only the record id; subscribers refresh the full collection
/// rather than patching incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Inserted(String),
    Updated(String),
    Removed(String),
}

/// The Remote Store's public collection of published records
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert or overwrite the record keyed by its id
    async fn upsert(&self, record: &PublishedRecord) -> Result<(), RemoteError>;

    /// Delete the record with the given id; absent ids are not an error
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;

    /// Full scan, ordered most-recently-updated first
    async fn fetch_all(&self) -> Result<Vec<PublishedRecord>, RemoteError>;

    /// Subscribe to insert/update/delete notifications
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}
