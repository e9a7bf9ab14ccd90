//! Publication gateway
//!
//! One-way bridge that mirrors a story into the Remote Store's public
//! collection and can retract it. The local story stays the source of
//! truth; the remote record is a point-in-time export keyed by the
//! story's id.
//!
//! Failure semantics differ from local persistence on purpose: a remote
//! error leaves the story (including `is_published`) completely unchanged
//! and is surfaced to the caller, because the user must know a
//! network-facing action did not take effect.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::models::{PublishedRecord, Story};
use crate::remote::{RemoteError, RemoteStore};
use crate::session::Session;

/// Author marker used when publishing anonymously
pub const ANONYMOUS_AUTHOR: &str = "Anónimo";

/// Errors from publish/update/retract
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("story is not published")]
    NotPublished,

    #[error("failed to serialize pages: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// One-directional export/retract bridge to the Remote Store
pub struct PublicationGateway {
    remote: Arc<dyn RemoteStore>,
}

impl PublicationGateway {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self { remote }
    }

    /// Publish a story, binding the author name
    ///
    /// The effective author is the session's display name, or the literal
    /// anonymous marker. On success the story is marked published and the
    /// author name is frozen; a later profile rename does not retroactively
    /// change it unless the user publishes again.
    pub async fn publish(
        &self,
        story: &mut Story,
        session: &Session,
        as_anonymous: bool,
    ) -> Result<PublishedRecord, PublishError> {
        let author = if as_anonymous {
            ANONYMOUS_AUTHOR
        } else {
            session.display_name.as_str()
        };

        let record = PublishedRecord::from_story(story, author)?;
        self.remote.upsert(&record).await?;

        // Only now, with the remote write confirmed, transition locally
        story.is_published = true;
        story.author_name = Some(author.to_string());
        story.touch();

        info!("Published story {} as {}", story.id, author);
        Ok(record)
    }

    /// Overwrite the remote record for an already-published story
    ///
    /// Keeps the frozen author name; valid only while `is_published`.
    pub async fn update(&self, story: &Story) -> Result<PublishedRecord, PublishError> {
        if !story.is_published {
            return Err(PublishError::NotPublished);
        }

        let author = story.author_name.as_deref().unwrap_or(ANONYMOUS_AUTHOR);
        let record = PublishedRecord::from_story(story, author)?;
        self.remote.upsert(&record).await?;

        info!("Republished story {}", story.id);
        Ok(record)
    }

    /// Remove the story from the public collection
    ///
    /// The story and its pages are untouched locally; only `is_published`
    /// flips, and `author_name` retains its last-bound value.
    pub async fn retract(&self, story: &mut Story) -> Result<(), PublishError> {
        if !story.is_published {
            return Err(PublishError::NotPublished);
        }

        self.remote.delete(&story.id).await?;

        story.is_published = false;
        story.touch();

        info!("Retracted story {}", story.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::metrics::count_words;
    use crate::remote::MemoryRemote;
    use crate::store::Store;
    use tempfile::TempDir;

    fn gateway() -> (Arc<MemoryRemote>, PublicationGateway) {
        let remote = Arc::new(MemoryRemote::new());
        let gateway = PublicationGateway::new(remote.clone());
        (remote, gateway)
    }

    #[tokio::test]
    async fn test_publish_binds_display_name() {
        let (remote, gateway) = gateway();
        let mut story = Story::new("Untitled");
        let session = Session::local("Ana");

        let record = gateway.publish(&mut story, &session, false).await.unwrap();
        assert_eq!(record.author_name, "Ana");
        assert!(story.is_published);
        assert_eq!(story.author_name, Some("Ana".to_string()));

        let all = remote.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, story.id);
    }

    #[tokio::test]
    async fn test_publish_anonymous_masks_identity() {
        let (_, gateway) = gateway();
        let mut story = Story::new("Untitled");
        let session = Session::local("Ana");

        let record = gateway.publish(&mut story, &session, true).await.unwrap();
        assert_eq!(record.author_name, ANONYMOUS_AUTHOR);
        assert_eq!(story.author_name, Some(ANONYMOUS_AUTHOR.to_string()));
    }

    #[tokio::test]
    async fn test_update_keeps_frozen_author() {
        let (remote, gateway) = gateway();
        let mut story = Story::new("Untitled");
        let session = Session::local("Ana");

        gateway.publish(&mut story, &session, true).await.unwrap();

        // Profile rename after publishing must not leak into the record
        story.set_title("The Long Walk");
        let record = gateway.update(&story).await.unwrap();
        assert_eq!(record.author_name, ANONYMOUS_AUTHOR);
        assert_eq!(record.title, "The Long Walk");

        let all = remote.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "The Long Walk");
    }

    #[tokio::test]
    async fn test_update_requires_published() {
        let (_, gateway) = gateway();
        let story = Story::new("Untitled");

        assert!(matches!(
            gateway.update(&story).await,
            Err(PublishError::NotPublished)
        ));
    }

    #[tokio::test]
    async fn test_retract_leaves_content_intact() {
        let (remote, gateway) = gateway();
        let mut story = Story::new("Untitled");
        story.add_genre(crate::models::Genre::Drama);
        let session = Session::local("Ana");

        gateway.publish(&mut story, &session, true).await.unwrap();

        let title = story.title.clone();
        let pages = story.pages.clone();
        let genres = story.genres.clone();

        gateway.retract(&mut story).await.unwrap();

        assert!(!story.is_published);
        // author_name retains the last-bound value
        assert_eq!(story.author_name, Some(ANONYMOUS_AUTHOR.to_string()));
        assert_eq!(story.title, title);
        assert_eq!(story.pages, pages);
        assert_eq!(story.genres, genres);
        assert!(remote.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_story_unchanged() {
        let (remote, gateway) = gateway();
        let mut story = Story::new("Untitled");
        let session = Session::local("Ana");

        remote.set_unavailable(true);
        let err = gateway.publish(&mut story, &session, false).await;
        assert!(err.is_err());
        assert!(!story.is_published);
        assert!(story.author_name.is_none());

        // Same for retract on a published story
        remote.set_unavailable(false);
        gateway.publish(&mut story, &session, false).await.unwrap();
        remote.set_unavailable(true);
        assert!(gateway.retract(&mut story).await.is_err());
        assert!(story.is_published);
    }

    /// Full walk through the journaling happy path: folder, story, edit,
    /// word count, anonymous publish, retract.
    #[tokio::test]
    async fn test_draft_to_publish_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(Config {
            data_dir: temp_dir.path().to_path_buf(),
            remote_path: None,
            display_name: None,
        });
        let (_, gateway) = gateway();
        let session = Session::local("Ana");

        let drafts = store.create_folder("Drafts", None).unwrap();
        let created = store.create_story("Untitled", Some(&drafts.id)).unwrap();

        let mut story = created.clone();
        story.set_title("The Long Walk");
        let page_id = story.pages[0].id.clone();
        story.set_page_content(&page_id, "<p>Hello world</p>");
        store.update_story(story.clone()).unwrap();

        assert_eq!(count_words(&story.pages[0].content), 2);

        gateway.publish(&mut story, &session, true).await.unwrap();
        gateway.retract(&mut story).await.unwrap();
        store.update_story(story.clone()).unwrap();

        let final_story = store.story(&created.id).unwrap();
        assert!(!final_story.is_published);
        assert_eq!(
            final_story.author_name,
            Some(ANONYMOUS_AUTHOR.to_string())
        );
        // Still filed under "Drafts"
        assert_eq!(final_story.folder_id, Some(drafts.id));
    }
}
