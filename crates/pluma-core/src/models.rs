//! Data models for Pluma
//!
//! Defines the core data structures: Story, Page, Folder, CloudImage,
//! and the Library snapshot that the local slot persists. The local
//! snapshot is serialized with camelCase field names; the published
//! record wire shape uses snake_case (see [`PublishedRecord`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ident::generate_id;

/// Title given to the first page of a freshly created story
pub const FIRST_PAGE_TITLE: &str = "I";

/// Genre vocabulary for stories
///
/// Fixed set; a story holds these without duplicates, order insignificant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Comedy,
    Thriller,
    Horror,
    Action,
    Romance,
    Drama,
    Fantasy,
    SciFi,
    BL,
    GL,
    Mystery,
    Adventure,
    Historical,
}

impl Genre {
    /// All genres, in declaration order
    pub fn all() -> &'static [Genre] {
        &[
            Genre::Comedy,
            Genre::Thriller,
            Genre::Horror,
            Genre::Action,
            Genre::Romance,
            Genre::Drama,
            Genre::Fantasy,
            Genre::SciFi,
            Genre::BL,
            Genre::GL,
            Genre::Mystery,
            Genre::Adventure,
            Genre::Historical,
        ]
    }

    /// The wire/display name of the genre
    pub fn name(&self) -> &'static str {
        match self {
            Genre::Comedy => "Comedy",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::Action => "Action",
            Genre::Romance => "Romance",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::SciFi => "SciFi",
            Genre::BL => "BL",
            Genre::GL => "GL",
            Genre::Mystery => "Mystery",
            Genre::Adventure => "Adventure",
            Genre::Historical => "Historical",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::all()
            .iter()
            .find(|g| g.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown genre: {}", s))
    }
}

/// Writing status of a story
///
/// Freely settable by the owner; no transitions are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StoryStatus {
    #[default]
    Draft,
    InProgress,
    Finished,
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoryStatus::Draft => "Draft",
            StoryStatus::InProgress => "InProgress",
            StoryStatus::Finished => "Finished",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for StoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(StoryStatus::Draft),
            "inprogress" | "in-progress" => Ok(StoryStatus::InProgress),
            "finished" => Ok(StoryStatus::Finished),
            _ => Err(format!("unknown status: {}", s)),
        }
    }
}

/// One page of a story
///
/// Owned by exactly one story; `order` is the sort key for display and
/// navigation and is not required to be contiguous.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique identifier
    pub id: String,
    /// Page title
    pub title: String,
    /// Opaque rich-text markup
    pub content: String,
    /// Sort key within the story
    pub order: u32,
}

impl Page {
    /// Create a new empty page
    pub fn new(title: impl Into<String>, order: u32) -> Self {
        Self {
            id: generate_id("page"),
            title: title.into(),
            content: String::new(),
            order,
        }
    }
}

/// A story: the unit of writing, publishing, and organization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Story title
    pub title: String,
    /// Short synopsis shown in listings and the community feed
    pub synopsis: String,
    /// Genre tags, no duplicates
    pub genres: Vec<Genre>,
    /// Writing status
    pub status: StoryStatus,
    /// Containing folder; `None` means root level
    pub folder_id: Option<String>,
    /// When this story was created
    pub created_at: DateTime<Utc>,
    /// When this story was last changed; bumped on every mutation
    pub updated_at: DateTime<Utc>,
    /// Pages, sorted for display by their `order` field
    pub pages: Vec<Page>,
    /// Whether a published record currently exists for this story
    pub is_published: bool,
    /// Author display name bound at publish time; retained after retract
    pub author_name: Option<String>,
}

impl Story {
    /// Create a new draft story with a single empty page
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id("story"),
            title: title.into(),
            synopsis: String::new(),
            genres: Vec::new(),
            status: StoryStatus::Draft,
            folder_id: None,
            created_at: now,
            updated_at: now,
            pages: vec![Page::new(FIRST_PAGE_TITLE, 0)],
            is_published: false,
            author_name: None,
        }
    }

    /// Update the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    /// Update the synopsis
    pub fn set_synopsis(&mut self, synopsis: impl Into<String>) {
        self.synopsis = synopsis.into();
        self.touch();
    }

    /// Set the writing status
    pub fn set_status(&mut self, status: StoryStatus) {
        self.status = status;
        self.touch();
    }

    /// Add a genre tag
    pub fn add_genre(&mut self, genre: Genre) {
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
            self.touch();
        }
    }

    /// Remove a genre tag
    pub fn remove_genre(&mut self, genre: Genre) {
        if let Some(pos) = self.genres.iter().position(|g| *g == genre) {
            self.genres.remove(pos);
            self.touch();
        }
    }

    /// Append a new page; its order equals the current page count
    pub fn add_page(&mut self, title: impl Into<String>) -> &Page {
        let idx = self.pages.len();
        let page = Page::new(title, idx as u32);
        self.pages.push(page);
        self.touch();
        &self.pages[idx]
    }

    /// Get a page by id
    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// Replace a page's content; returns false if the page is unknown
    pub fn set_page_content(&mut self, page_id: &str, content: impl Into<String>) -> bool {
        match self.pages.iter_mut().find(|p| p.id == page_id) {
            Some(page) => {
                page.content = content.into();
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Rename a page; returns false if the page is unknown
    pub fn set_page_title(&mut self, page_id: &str, title: impl Into<String>) -> bool {
        match self.pages.iter_mut().find(|p| p.id == page_id) {
            Some(page) => {
                page.title = title.into();
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Pages sorted by their `order` field
    pub fn pages_in_order(&self) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.iter().collect();
        pages.sort_by_key(|p| p.order);
        pages
    }

    /// Bump `updated_at` to now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A folder for organizing stories, forming a tree via `parent_id`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique identifier
    pub id: String,
    /// Folder name
    pub name: String,
    /// Parent folder; `None` means root level
    pub parent_id: Option<String>,
    /// When this folder was created
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Create a new folder
    pub fn new(name: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            id: generate_id("folder"),
            name: name.into(),
            parent_id,
            created_at: Utc::now(),
        }
    }
}

/// An uploaded image asset, stored inline as an encoded blob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloudImage {
    /// Unique identifier
    pub id: String,
    /// Base64-encoded image bytes
    pub data: String,
    /// Display name
    pub name: String,
    /// Original size in bytes
    pub size: u64,
    /// When this image was stored
    pub created_at: DateTime<Utc>,
}

impl CloudImage {
    /// Create a new image record from already-encoded data
    pub fn new(name: impl Into<String>, data: String, size: u64) -> Self {
        Self {
            id: generate_id("img"),
            data,
            name: name.into(),
            size,
            created_at: Utc::now(),
        }
    }
}

/// The full local snapshot: everything the local slot persists
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub stories: Vec<Story>,
    pub folders: Vec<Folder>,
    pub cloud_images: Vec<CloudImage>,
}

/// A published story as it exists in the Remote Store's public collection
///
/// Derived from a [`Story`] at publish time; never authoritative. The
/// local story remains the source of truth and this record is a
/// point-in-time export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishedRecord {
    /// Mirrors the story id
    pub id: String,
    pub title: String,
    pub synopsis: String,
    pub genres: Vec<Genre>,
    pub status: StoryStatus,
    /// The story's pages serialized as a JSON array, in display order
    pub content_json: String,
    /// Author display name frozen at publish time
    pub author_name: String,
    /// When this record was last pushed
    pub updated_at: DateTime<Utc>,
}

impl PublishedRecord {
    /// Build a record from a story and a resolved author name
    pub fn from_story(story: &Story, author_name: &str) -> Result<Self, serde_json::Error> {
        let pages: Vec<&Page> = story.pages_in_order();
        let content_json = serde_json::to_string(&pages)?;

        Ok(Self {
            id: story.id.clone(),
            title: story.title.clone(),
            synopsis: story.synopsis.clone(),
            genres: story.genres.clone(),
            status: story.status,
            content_json,
            author_name: author_name.to_string(),
            updated_at: Utc::now(),
        })
    }

    /// Decode the serialized pages
    pub fn pages(&self) -> Result<Vec<Page>, serde_json::Error> {
        serde_json::from_str(&self.content_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_new_has_one_page() {
        let story = Story::new("Untitled");
        assert_eq!(story.title, "Untitled");
        assert_eq!(story.pages.len(), 1);
        assert_eq!(story.pages[0].order, 0);
        assert_eq!(story.pages[0].title, FIRST_PAGE_TITLE);
        assert_eq!(story.created_at, story.updated_at);
        assert!(!story.is_published);
        assert!(story.author_name.is_none());
    }

    #[test]
    fn test_story_set_title_bumps_updated_at() {
        let mut story = Story::new("Untitled");
        let original = story.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(10));
        story.set_title("The Long Walk");
        assert_eq!(story.title, "The Long Walk");
        assert!(story.updated_at > original);
        assert!(story.updated_at >= story.created_at);
    }

    #[test]
    fn test_story_genres_no_duplicates() {
        let mut story = Story::new("Untitled");
        story.add_genre(Genre::Horror);
        story.add_genre(Genre::Mystery);
        story.add_genre(Genre::Horror);
        assert_eq!(story.genres, vec![Genre::Horror, Genre::Mystery]);

        story.remove_genre(Genre::Horror);
        assert_eq!(story.genres, vec![Genre::Mystery]);
    }

    #[test]
    fn test_add_page_order_equals_page_count() {
        let mut story = Story::new("Untitled");
        let second = story.add_page("II").id.clone();
        let third = story.add_page("III").id.clone();

        assert_eq!(story.page(&second).unwrap().order, 1);
        assert_eq!(story.page(&third).unwrap().order, 2);
    }

    #[test]
    fn test_pages_in_order_sorts_by_order_key() {
        let mut story = Story::new("Untitled");
        story.add_page("II");
        // Orders need not be contiguous; sort must still hold
        story.pages[0].order = 5;
        let titles: Vec<&str> = story
            .pages_in_order()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["II", FIRST_PAGE_TITLE]);
    }

    #[test]
    fn test_set_page_content() {
        let mut story = Story::new("Untitled");
        let page_id = story.pages[0].id.clone();

        assert!(story.set_page_content(&page_id, "<p>Hello world</p>"));
        assert_eq!(story.pages[0].content, "<p>Hello world</p>");

        assert!(!story.set_page_content("page-missing", "x"));
    }

    #[test]
    fn test_genre_round_trip() {
        for genre in Genre::all() {
            let parsed: Genre = genre.name().parse().unwrap();
            assert_eq!(parsed, *genre);
        }
        assert!("Poetry".parse::<Genre>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("draft".parse::<StoryStatus>().unwrap(), StoryStatus::Draft);
        assert_eq!(
            "in-progress".parse::<StoryStatus>().unwrap(),
            StoryStatus::InProgress
        );
        assert_eq!(
            "Finished".parse::<StoryStatus>().unwrap(),
            StoryStatus::Finished
        );
        assert!("done".parse::<StoryStatus>().is_err());
    }

    #[test]
    fn test_story_snapshot_field_names_are_camel_case() {
        let story = Story::new("Untitled");
        let json = serde_json::to_string(&story).unwrap();
        assert!(json.contains("\"folderId\""));
        assert!(json.contains("\"isPublished\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"authorName\""));
    }

    #[test]
    fn test_library_snapshot_field_names() {
        let library = Library::default();
        let json = serde_json::to_string(&library).unwrap();
        assert!(json.contains("\"cloudImages\""));
        assert!(json.contains("\"stories\""));
        assert!(json.contains("\"folders\""));
    }

    #[test]
    fn test_published_record_wire_shape() {
        let mut story = Story::new("Untitled");
        story.add_genre(Genre::SciFi);
        let record = PublishedRecord::from_story(&story, "Anónimo").unwrap();
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"content_json\""));
        assert!(json.contains("\"author_name\""));
        assert!(json.contains("\"updated_at\""));
        assert!(json.contains("\"SciFi\""));
    }

    #[test]
    fn test_published_record_pages_round_trip() {
        let mut story = Story::new("Untitled");
        let page_id = story.pages[0].id.clone();
        story.set_page_content(&page_id, "<p>once upon a time</p>");
        story.add_page("II");

        let record = PublishedRecord::from_story(&story, "Ana").unwrap();
        let pages = record.pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].content, "<p>once upon a time</p>");
        assert_eq!(pages[1].title, "II");
    }

    #[test]
    fn test_story_serialization_round_trip() {
        let mut story = Story::new("Untitled");
        story.set_synopsis("a short tale");
        story.add_genre(Genre::Drama);
        let json = serde_json::to_string(&story).unwrap();
        let back: Story = serde_json::from_str(&json).unwrap();
        assert_eq!(story, back);
    }
}
