//! Library snapshot persistence
//!
//! Saves and loads the full [`Library`] as one JSON document. Uses atomic
//! writes (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/pluma/library.json` (configurable
//! via `Config`).
//!
//! Failure policy differs from the remote side on purpose:
//! - `load` never fails: missing, unreadable, or unparsable data yields
//!   the empty default so a corrupt slot can't break startup.
//! - `save` never propagates: a failed write is logged and dropped; the
//!   in-memory library remains authoritative for the session.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::Library;

/// Persistence handler for the library snapshot slot
pub struct LibraryPersistence {
    config: Config,
}

impl LibraryPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load configuration from default location and create persistence handler
    pub fn with_default_config() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::new(config))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the snapshot slot
    pub fn path(&self) -> PathBuf {
        self.config.library_path()
    }

    /// Check if a snapshot exists on disk
    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Load the library snapshot
    ///
    /// Missing, unreadable, or corrupt data yields `Library::default()`.
    pub fn load(&self) -> Library {
        let path = self.path();

        if !path.exists() {
            debug!("No library snapshot at {:?}, starting empty", path);
            return Library::default();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read library snapshot {:?}: {}", path, e);
                return Library::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(library) => library,
            Err(e) => {
                warn!("Corrupt library snapshot {:?}: {}", path, e);
                Library::default()
            }
        }
    }

    /// Save the library snapshot atomically
    ///
    /// Persistence failures (quota, permissions, serialization) are
    /// logged and swallowed.
    pub fn save(&self, library: &Library) {
        let path = self.path();

        let bytes = match serde_json::to_vec_pretty(library) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize library snapshot: {}", e);
                return;
            }
        };

        if let Err(e) = atomic_write(&path, &bytes) {
            warn!("Failed to save library snapshot to {:?}: {}", path, e);
        }
    }

    /// Delete the stored snapshot
    ///
    /// Use with caution!
    pub fn delete(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to delete {:?}", path))?;
        }
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    // Create temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    // Write to temp file
    let mut file = File::create(&temp_path)
        .with_context(|| format!("Failed to create temp file {:?}", temp_path))?;

    file.write_all(data)
        .with_context(|| format!("Failed to write to temp file {:?}", temp_path))?;

    // Sync to disk before rename
    file.sync_all()
        .with_context(|| format!("Failed to sync temp file {:?}", temp_path))?;

    // Atomic rename
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename {:?} to {:?}", temp_path, path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Folder, Story};
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            remote_path: None,
            display_name: None,
        }
    }

    #[test]
    fn test_load_missing_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = LibraryPersistence::new(test_config(&temp_dir));

        assert!(!persistence.exists());
        let library = persistence.load();
        assert!(library.stories.is_empty());
        assert!(library.folders.is_empty());
        assert!(library.cloud_images.is_empty());
    }

    #[test]
    fn test_load_corrupt_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = LibraryPersistence::new(test_config(&temp_dir));

        fs::write(persistence.path(), "{not json at all").unwrap();
        let library = persistence.load();
        assert_eq!(library, Library::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = LibraryPersistence::new(test_config(&temp_dir));

        let parent = Folder::new("Novels", None);
        let nested = Folder::new("Drafts", Some(parent.id.clone()));

        let mut story = Story::new("The Long Walk");
        let page_id = story.pages[0].id.clone();
        story.set_page_content(&page_id, "<p>one</p>");
        story.add_page("II");
        story.folder_id = Some(nested.id.clone());

        let library = Library {
            stories: vec![story],
            folders: vec![parent, nested],
            cloud_images: vec![],
        };

        persistence.save(&library);
        assert!(persistence.exists());

        let loaded = persistence.load();
        assert_eq!(loaded, library);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = LibraryPersistence::new(test_config(&temp_dir));

        let mut library = Library::default();
        library.stories.push(Story::new("First"));
        persistence.save(&library);

        library.stories.push(Story::new("Second"));
        persistence.save(&library);

        let loaded = persistence.load();
        assert_eq!(loaded.stories.len(), 2);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        // Point the data dir at a path that cannot be a directory
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"file, not a dir").unwrap();

        let config = Config {
            data_dir: blocker.join("nested"),
            remote_path: None,
            display_name: None,
        };
        let persistence = LibraryPersistence::new(config);

        // Must not panic or propagate
        persistence.save(&Library::default());
        assert_eq!(persistence.load(), Library::default());
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = LibraryPersistence::new(test_config(&temp_dir));

        persistence.save(&Library::default());
        assert!(persistence.exists());

        persistence.delete().unwrap();
        assert!(!persistence.exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.txt");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }
}
