//! Local document store
//!
//! The `Store` owns the canonical in-memory [`Library`] (stories, folders,
//! cloud images) and routes every mutation through typed operations. It is
//! an explicit object injected where needed; there is no ambient singleton.
//!
//! Mutations are memory-only. Persistence happens through [`Store::save`]
//! (swallowing, see the storage module) or through the debounced
//! [`crate::autosave::Autosaver`] for long-lived editing sessions.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let folder = store.create_folder("Drafts", None)?;
//! let story = store.create_story("Untitled", Some(&folder.id))?;
//!
//! store.save();
//! ```

use anyhow::{Context, Result};
use base64::Engine;
use thiserror::Error;

use crate::config::Config;
use crate::models::{CloudImage, Folder, Genre, Library, Story};
use crate::storage::LibraryPersistence;

/// Maximum number of concurrently retained cloud images
pub const MAX_CLOUD_IMAGES: usize = 9;

/// Errors from store operations
///
/// Every variant means "nothing was mutated".
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("folder name cannot be empty")]
    EmptyFolderName,

    #[error("no story with id: {0}")]
    UnknownStory(String),

    #[error("no folder with id: {0}")]
    UnknownFolder(String),

    #[error("no image with id: {0}")]
    UnknownImage(String),

    #[error("invalid move target: {0}")]
    InvalidMoveTarget(String),

    #[error("image limit reached ({MAX_CLOUD_IMAGES} max)")]
    ImageLimitReached,
}

/// Filter for [`Store::list_children`]
#[derive(Debug, Clone, Default)]
pub struct ChildFilter {
    /// Case-insensitive substring match on folder name / story title
    pub query: Option<String>,
    /// Only stories carrying this genre
    pub genre: Option<Genre>,
}

impl ChildFilter {
    fn matches_name(&self, name: &str) -> bool {
        match &self.query {
            Some(q) => name.to_lowercase().contains(&q.to_lowercase()),
            None => true,
        }
    }

    fn matches_story(&self, story: &Story) -> bool {
        let genre_ok = match self.genre {
            Some(genre) => story.genres.contains(&genre),
            None => true,
        };
        genre_ok && self.matches_name(&story.title)
    }
}

/// The local document store
pub struct Store {
    library: Library,
    persistence: LibraryPersistence,
}

impl Store {
    /// Open the store with the default configuration
    ///
    /// A missing or corrupt snapshot never fails the open; it degrades to
    /// an empty library.
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(config))
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Self {
        let persistence = LibraryPersistence::new(config);
        let library = persistence.load();
        Self {
            library,
            persistence,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.persistence.config()
    }

    /// The full in-memory snapshot
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Clone the snapshot (for the debounced autosaver)
    pub fn snapshot(&self) -> Library {
        self.library.clone()
    }

    /// Persist the full snapshot now
    ///
    /// Failures are swallowed by the persistence layer; in-memory state
    /// stays authoritative either way.
    pub fn save(&self) {
        self.persistence.save(&self.library);
    }

    // ==================== Story Operations ====================

    /// Create a new story and insert it at the front of the collection
    ///
    /// The story starts as a Draft with a single empty page titled "I".
    pub fn create_story(
        &mut self,
        title: impl Into<String>,
        folder_id: Option<&str>,
    ) -> Result<Story, StoreError> {
        if let Some(id) = folder_id {
            if self.folder(id).is_none() {
                return Err(StoreError::UnknownFolder(id.to_string()));
            }
        }

        let mut story = Story::new(title);
        story.folder_id = folder_id.map(str::to_string);

        // Most-recent-first is the canonical list order
        self.library.stories.insert(0, story.clone());
        Ok(story)
    }

    /// Get a story by id
    pub fn story(&self, id: &str) -> Option<&Story> {
        self.library.stories.iter().find(|s| s.id == id)
    }

    /// All stories, newest first
    pub fn stories(&self) -> &[Story] {
        &self.library.stories
    }

    /// Replace the story with a matching id, bumping its `updated_at`
    pub fn update_story(&mut self, mut story: Story) -> Result<(), StoreError> {
        let slot = self
            .library
            .stories
            .iter_mut()
            .find(|s| s.id == story.id)
            .ok_or_else(|| StoreError::UnknownStory(story.id.clone()))?;

        story.touch();
        *slot = story;
        Ok(())
    }

    /// Remove a story by id
    ///
    /// User confirmation is the boundary's concern, not the store's.
    pub fn delete_story(&mut self, id: &str) -> Result<Story, StoreError> {
        let pos = self
            .library
            .stories
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::UnknownStory(id.to_string()))?;

        Ok(self.library.stories.remove(pos))
    }

    /// Move a story into a folder (or to root with `None`)
    ///
    /// A non-null target must name an existing folder; otherwise nothing
    /// changes.
    pub fn move_story(
        &mut self,
        story_id: &str,
        target_folder_id: Option<&str>,
    ) -> Result<(), StoreError> {
        if let Some(target) = target_folder_id {
            if self.folder(target).is_none() {
                return Err(StoreError::InvalidMoveTarget(target.to_string()));
            }
        }

        let story = self
            .library
            .stories
            .iter_mut()
            .find(|s| s.id == story_id)
            .ok_or_else(|| StoreError::UnknownStory(story_id.to_string()))?;

        story.folder_id = target_folder_id.map(str::to_string);
        story.touch();
        Ok(())
    }

    // ==================== Folder Operations ====================

    /// Create a folder
    ///
    /// Empty or whitespace-only names are rejected with no mutation.
    pub fn create_folder(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Result<Folder, StoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::EmptyFolderName);
        }

        if let Some(id) = parent_id {
            if self.folder(id).is_none() {
                return Err(StoreError::UnknownFolder(id.to_string()));
            }
        }

        let folder = Folder::new(name, parent_id.map(str::to_string));
        self.library.folders.push(folder.clone());
        Ok(folder)
    }

    /// Get a folder by id
    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.library.folders.iter().find(|f| f.id == id)
    }

    /// All folders
    pub fn folders(&self) -> &[Folder] {
        &self.library.folders
    }

    /// Remove a folder, reparenting its direct-child stories to root
    ///
    /// Folders nested under the deleted one are left in place; only their
    /// parent link dangles.
    pub fn delete_folder(&mut self, id: &str) -> Result<(), StoreError> {
        let pos = self
            .library
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| StoreError::UnknownFolder(id.to_string()))?;

        self.library.folders.remove(pos);

        for story in self
            .library
            .stories
            .iter_mut()
            .filter(|s| s.folder_id.as_deref() == Some(id))
        {
            story.folder_id = None;
            story.touch();
        }

        Ok(())
    }

    /// Direct children of a folder (or of the root with `None`), one level
    ///
    /// Optionally filtered by a text query and a genre predicate.
    pub fn list_children(
        &self,
        folder_id: Option<&str>,
        filter: &ChildFilter,
    ) -> (Vec<&Folder>, Vec<&Story>) {
        let folders = self
            .library
            .folders
            .iter()
            .filter(|f| f.parent_id.as_deref() == folder_id)
            .filter(|f| filter.matches_name(&f.name))
            .collect();

        let stories = self
            .library
            .stories
            .iter()
            .filter(|s| s.folder_id.as_deref() == folder_id)
            .filter(|s| filter.matches_story(s))
            .collect();

        (folders, stories)
    }

    // ==================== Cloud Images ====================

    /// Store an image, encoding its bytes
    ///
    /// The collection is bounded: once 9 images are retained, further
    /// inserts are rejected. No eviction is applied.
    pub fn add_image(
        &mut self,
        name: impl Into<String>,
        bytes: &[u8],
    ) -> Result<CloudImage, StoreError> {
        if self.library.cloud_images.len() >= MAX_CLOUD_IMAGES {
            return Err(StoreError::ImageLimitReached);
        }

        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        let image = CloudImage::new(name, data, bytes.len() as u64);
        self.library.cloud_images.push(image.clone());
        Ok(image)
    }

    /// All stored images
    pub fn images(&self) -> &[CloudImage] {
        &self.library.cloud_images
    }

    /// Remove an image by id
    pub fn remove_image(&mut self, id: &str) -> Result<(), StoreError> {
        let pos = self
            .library
            .cloud_images
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::UnknownImage(id.to_string()))?;

        self.library.cloud_images.remove(pos);
        Ok(())
    }

    // ==================== Stats ====================

    /// Number of stories
    pub fn story_count(&self) -> usize {
        self.library.stories.len()
    }

    /// Number of folders
    pub fn folder_count(&self) -> usize {
        self.library.folders.len()
    }
}
