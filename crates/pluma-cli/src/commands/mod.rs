//! Command handlers
//!
//! One module per command family, all taking the injected `Store` and the
//! shared `Output` helper.

pub mod config;
pub mod feed;
pub mod folder;
pub mod image;
pub mod publish;
pub mod status;
pub mod story;

use std::sync::Arc;

use anyhow::{bail, Result};

use pluma_core::{Config, FileRemote, Store};

/// Resolve a story id (full id or unambiguous prefix)
pub fn resolve_story_id(id: &str, store: &Store) -> Result<String> {
    if store.story(id).is_some() {
        return Ok(id.to_string());
    }

    let matches: Vec<_> = store
        .stories()
        .iter()
        .filter(|s| s.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No story found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple stories match '{}':", id);
            for story in &matches {
                eprintln!("  {} - {}", story.id, story.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Resolve a folder id (full id or unambiguous prefix)
pub fn resolve_folder_id(id: &str, store: &Store) -> Result<String> {
    if store.folder(id).is_some() {
        return Ok(id.to_string());
    }

    let matches: Vec<_> = store
        .folders()
        .iter()
        .filter(|f| f.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No folder found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple folders match '{}':", id);
            for folder in &matches {
                eprintln!("  {} - {}", folder.id, folder.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Open the community remote configured in `remote_path`
pub fn open_remote(config: &Config) -> Result<Arc<FileRemote>> {
    match &config.remote_path {
        Some(path) => Ok(Arc::new(FileRemote::new(path.clone()))),
        None => bail!(
            "No community remote configured.\n\
             Set one with: pluma config set remote_path /path/to/published.json"
        ),
    }
}
