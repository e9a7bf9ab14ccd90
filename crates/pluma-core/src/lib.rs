//! Pluma Core Library
//!
//! This crate provides the core functionality for Pluma, a local-first
//! writing/journaling application: stories made of ordered pages,
//! organized into folders, with optional publishing to a shared
//! community feed.
//!
//! # Architecture
//!
//! - The [`Store`] owns the canonical in-memory [`Library`] and routes
//!   every mutation through typed operations.
//! - The library persists as one JSON snapshot in a local slot; reads
//!   degrade to an empty default, writes never propagate failures.
//! - The [`PublicationGateway`] mirrors stories into an external Remote
//!   Store; the [`FeedReader`] caches the resulting public feed.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! let folder = store.create_folder("Drafts", None)?;
//! let story = store.create_story("Untitled", Some(&folder.id))?;
//! store.save();
//! ```
//!
//! # Modules
//!
//! - `store`: local document store (main entry point)
//! - `models`: stories, pages, folders, images, published records
//! - `storage`: snapshot persistence (atomic, failure-swallowing)
//! - `autosave`: debounced snapshot writes for editing sessions
//! - `publish`: export/retract bridge to the Remote Store
//! - `feed`: cached reader over the public collection
//! - `remote`: Remote Store seam and backends
//! - `session`: Identity Provider seam
//! - `ident`: prefixed, time-ordered id generation
//! - `metrics`: word counts and display formatting
//! - `config`: application configuration

pub mod autosave;
pub mod config;
pub mod feed;
pub mod ident;
pub mod metrics;
pub mod models;
pub mod publish;
pub mod remote;
pub mod session;
pub mod storage;
pub mod store;

pub use autosave::{Autosaver, AUTOSAVE_DELAY};
pub use config::Config;
pub use feed::FeedReader;
pub use ident::generate_id;
pub use models::{
    CloudImage, Folder, Genre, Library, Page, PublishedRecord, Story, StoryStatus,
};
pub use publish::{PublicationGateway, PublishError, ANONYMOUS_AUTHOR};
pub use remote::{ChangeEvent, FileRemote, MemoryRemote, RemoteError, RemoteStore};
pub use session::{IdentityError, IdentityProvider, Session};
pub use storage::LibraryPersistence;
pub use store::{ChildFilter, Store, StoreError, MAX_CLOUD_IMAGES};
