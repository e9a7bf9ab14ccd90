//! Cloud image command handlers
//!
//! Images are stored inline in the library snapshot, base64-encoded.
//! The collection is capped at 9; the store rejects further inserts.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use pluma_core::Store;

use crate::output::{short_id, Output};

/// Store an image from a file
pub fn add(store: &mut Store, path: PathBuf, name: Option<String>, output: &Output) -> Result<()> {
    let bytes =
        fs::read(&path).with_context(|| format!("Failed to read image file: {:?}", path))?;

    let name = match name {
        Some(name) => name,
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string()),
    };

    let image = store
        .add_image(name, &bytes)
        .context("Failed to store image")?;

    output.success(&format!(
        "Stored image {} - {}",
        short_id(&image.id),
        image.name
    ));
    Ok(())
}

/// List stored images
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_images(store.images());
    Ok(())
}

/// Remove a stored image
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let full_id = match store.images().iter().find(|i| i.id.starts_with(&id)) {
        Some(image) => image.id.clone(),
        None => bail!("No image found matching: {}", id),
    };

    store
        .remove_image(&full_id)
        .context("Failed to remove image")?;

    output.success(&format!("Removed image: {}", short_id(&full_id)));
    Ok(())
}
