//! Storage layer
//!
//! The whole library snapshot lives in one named slot: a single JSON
//! document under the data directory. Reads degrade to an empty default
//! on missing or corrupt data; writes are atomic and failures are
//! swallowed, because the in-memory state stays authoritative for the
//! session.

pub mod persistence;

pub use persistence::LibraryPersistence;
