//! Status command

use anyhow::Result;

use pluma_core::{Config, Store, MAX_CLOUD_IMAGES};

use crate::output::Output;

/// Show library counts, paths, and publishing setup
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let config = store.config();
    let published = store
        .stories()
        .iter()
        .filter(|s| s.is_published)
        .count();

    if output.is_json() {
        let value = serde_json::json!({
            "library": config.library_path(),
            "stories": store.story_count(),
            "published": published,
            "folders": store.folder_count(),
            "images": store.images().len(),
            "image_limit": MAX_CLOUD_IMAGES,
            "remote_path": config.remote_path,
            "display_name": config.display_name,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if output.is_quiet() {
        println!("{}", store.story_count());
        return Ok(());
    }

    println!("Library:  {:?}", config.library_path());
    println!("Config:   {:?}", Config::config_file_path());
    println!();
    println!("Stories:  {} ({} published)", store.story_count(), published);
    println!("Folders:  {}", store.folder_count());
    println!("Images:   {} / {}", store.images().len(), MAX_CLOUD_IMAGES);
    println!();
    match &config.remote_path {
        Some(path) => println!("Remote:   {:?}", path),
        None => println!("Remote:   (not configured)"),
    }
    match &config.display_name {
        Some(name) => println!("Profile:  {}", name),
        None => println!("Profile:  anonymous"),
    }
    Ok(())
}
