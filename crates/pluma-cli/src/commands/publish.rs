//! Publishing command handlers
//!
//! Bridge local stories to the configured community remote. A publish
//! failure leaves the local story untouched, so the error is surfaced
//! rather than swallowed like local save errors are.

use anyhow::{Context, Result};

use pluma_core::{PublicationGateway, Session, Store, ANONYMOUS_AUTHOR};

use crate::commands::{open_remote, resolve_story_id};
use crate::output::{short_id, Output};

/// Publish a story, re-binding the author if already published
///
/// Republishing is the one action that re-resolves the author name, so a
/// profile rename or an `--anonymous` switch takes effect here and only
/// here. Upsert semantics on the remote make republish an overwrite.
pub async fn publish(
    store: &mut Store,
    id: String,
    anonymous: bool,
    output: &Output,
) -> Result<()> {
    let story_id = resolve_story_id(&id, store)?;
    let mut story = store
        .story(&story_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Story not found: {}", id))?;

    let remote = open_remote(store.config())?;
    let gateway = PublicationGateway::new(remote);

    let session = match &store.config().display_name {
        Some(name) => Session::local(name),
        None => Session::local(ANONYMOUS_AUTHOR),
    };

    let was_published = story.is_published;
    let record = gateway
        .publish(&mut story, &session, anonymous)
        .await
        .context("Failed to publish story")?;

    store
        .update_story(story)
        .context("Failed to record publication")?;

    output.success(&format!(
        "{} {} - {} (by {})",
        if was_published { "Republished" } else { "Published" },
        short_id(&story_id),
        record.title,
        record.author_name
    ));
    Ok(())
}

/// Remove a story from the community remote
pub async fn retract(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let story_id = resolve_story_id(&id, store)?;
    let mut story = store
        .story(&story_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Story not found: {}", id))?;

    let remote = open_remote(store.config())?;
    let gateway = PublicationGateway::new(remote);

    gateway
        .retract(&mut story)
        .await
        .context("Failed to retract story")?;

    store
        .update_story(story)
        .context("Failed to record retraction")?;

    output.success(&format!("Retracted story: {}", short_id(&story_id)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use pluma_core::{Config, FileRemote, RemoteStore};
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir, display_name: Option<&str>) -> Store {
        Store::open_with_config(Config {
            data_dir: temp_dir.path().join("data"),
            remote_path: Some(temp_dir.path().join("published.json")),
            display_name: display_name.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_republish_rebinds_author() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir, Some("Ana"));
        let output = Output::new(OutputFormat::Quiet);

        let story = store.create_story("Untitled", None).unwrap();

        publish(&mut store, story.id.clone(), false, &output)
            .await
            .unwrap();
        assert_eq!(
            store.story(&story.id).unwrap().author_name,
            Some("Ana".to_string())
        );

        // Publishing again with --anonymous swaps the bound author
        publish(&mut store, story.id.clone(), true, &output)
            .await
            .unwrap();
        let stored = store.story(&story.id).unwrap();
        assert!(stored.is_published);
        assert_eq!(stored.author_name, Some(ANONYMOUS_AUTHOR.to_string()));

        // One record on the remote, carrying the new author
        let remote = FileRemote::new(temp_dir.path().join("published.json"));
        let all = remote.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].author_name, ANONYMOUS_AUTHOR);
    }

    #[tokio::test]
    async fn test_publish_then_retract() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir, Some("Ana"));
        let output = Output::new(OutputFormat::Quiet);

        let story = store.create_story("Untitled", None).unwrap();
        publish(&mut store, story.id.clone(), false, &output)
            .await
            .unwrap();
        retract(&mut store, story.id.clone(), &output)
            .await
            .unwrap();

        let stored = store.story(&story.id).unwrap();
        assert!(!stored.is_published);
        // Last-bound author survives the retract
        assert_eq!(stored.author_name, Some("Ana".to_string()));

        let remote = FileRemote::new(temp_dir.path().join("published.json"));
        assert!(remote.fetch_all().await.unwrap().is_empty());
    }
}
