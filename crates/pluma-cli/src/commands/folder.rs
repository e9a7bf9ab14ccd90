//! Folder command handlers

use anyhow::{Context, Result};

use pluma_core::Store;

use crate::commands::resolve_folder_id;
use crate::editor::confirm;
use crate::output::{short_id, Output};

/// Create a new folder
pub fn create(
    store: &mut Store,
    name: String,
    parent: Option<String>,
    output: &Output,
) -> Result<()> {
    let parent_id = match parent {
        Some(ref p) => Some(resolve_folder_id(p, store)?),
        None => None,
    };

    let folder = store
        .create_folder(name, parent_id.as_deref())
        .context("Failed to create folder")?;

    output.success(&format!(
        "Created folder {} - {}",
        short_id(&folder.id),
        folder.name
    ));
    if output.is_quiet() {
        println!("{}", folder.id);
    }
    Ok(())
}

/// List all folders
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let folders: Vec<_> = store.folders().iter().collect();
    output.print_folders(&folders);
    Ok(())
}

/// Delete a folder; its stories move to the root
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let folder_id = resolve_folder_id(&id, store)?;
    let folder = store
        .folder(&folder_id)
        .ok_or_else(|| anyhow::anyhow!("Folder not found: {}", id))?;

    if output.should_prompt() {
        println!("Delete folder: {} - {}", short_id(&folder.id), folder.name);
        println!("Stories inside will move to the root level.");
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store
        .delete_folder(&folder_id)
        .context("Failed to delete folder")?;

    output.success(&format!("Deleted folder: {}", short_id(&folder_id)));
    Ok(())
}
