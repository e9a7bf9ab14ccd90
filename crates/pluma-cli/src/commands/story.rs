//! Story command handlers

use anyhow::{bail, Context, Result};

use pluma_core::{ChildFilter, Genre, Store, StoryStatus};

use crate::commands::{resolve_folder_id, resolve_story_id};
use crate::editor::{confirm, edit_text};
use crate::output::{short_id, Output};

/// Create a new story
pub fn create(
    store: &mut Store,
    title: String,
    folder: Option<String>,
    output: &Output,
) -> Result<()> {
    let folder_id = match folder {
        Some(ref f) => Some(resolve_folder_id(f, store)?),
        None => None,
    };

    let story = store
        .create_story(title, folder_id.as_deref())
        .context("Failed to create story")?;

    output.success(&format!(
        "Created story {} - {}",
        short_id(&story.id),
        story.title
    ));
    if output.is_quiet() {
        println!("{}", story.id);
    }
    Ok(())
}

/// List stories in a folder (root by default)
pub fn list(
    store: &Store,
    folder: Option<String>,
    query: Option<String>,
    genre: Option<Genre>,
    all: bool,
    output: &Output,
) -> Result<()> {
    if all {
        let stories: Vec<_> = store.stories().iter().collect();
        output.print_stories(&stories);
        return Ok(());
    }

    let folder_id = match folder {
        Some(ref f) => Some(resolve_folder_id(f, store)?),
        None => None,
    };

    let filter = ChildFilter { query, genre };
    let (folders, stories) = store.list_children(folder_id.as_deref(), &filter);

    if !folders.is_empty() {
        output.print_folders(&folders);
        if !output.is_quiet() {
            println!();
        }
    }
    output.print_stories(&stories);
    Ok(())
}

/// Show story details
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let story_id = resolve_story_id(&id, store)?;
    let story = store
        .story(&story_id)
        .ok_or_else(|| anyhow::anyhow!("Story not found: {}", id))?;

    output.print_story(story);
    Ok(())
}

/// Edit story metadata
pub fn edit(
    store: &mut Store,
    id: String,
    title: Option<String>,
    synopsis: Option<String>,
    status: Option<StoryStatus>,
    output: &Output,
) -> Result<()> {
    let story_id = resolve_story_id(&id, store)?;
    let mut story = store
        .story(&story_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Story not found: {}", id))?;

    if title.is_none() && synopsis.is_none() && status.is_none() {
        bail!("Nothing to change. Pass --title, --synopsis, or --status.");
    }

    if let Some(title) = title {
        story.set_title(title);
    }
    if let Some(synopsis) = synopsis {
        story.set_synopsis(synopsis);
    }
    if let Some(status) = status {
        story.set_status(status);
    }

    store
        .update_story(story)
        .context("Failed to update story")?;

    output.success(&format!("Updated story {}", short_id(&story_id)));
    Ok(())
}

/// Open a page's content in $EDITOR
pub fn write(store: &mut Store, id: String, page: Option<u32>, output: &Output) -> Result<()> {
    let story_id = resolve_story_id(&id, store)?;
    let mut story = store
        .story(&story_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Story not found: {}", id))?;

    let pages = story.pages_in_order();
    let target = match page {
        Some(order) => pages.iter().find(|p| p.order == order),
        None => pages.first(),
    };
    let Some(target) = target else {
        bail!("No page with order {:?} in story {}", page, short_id(&story_id));
    };
    let page_id = target.id.clone();
    let initial = target.content.clone();

    let edited = edit_text(&initial).context("Failed to edit page")?;
    if edited == initial {
        output.message("No changes.");
        return Ok(());
    }

    story.set_page_content(&page_id, edited);
    store
        .update_story(story)
        .context("Failed to update story")?;

    output.success(&format!("Updated page content in {}", short_id(&story_id)));
    Ok(())
}

/// Append a new page
pub fn add_page(store: &mut Store, id: String, title: String, output: &Output) -> Result<()> {
    let story_id = resolve_story_id(&id, store)?;
    let mut story = store
        .story(&story_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Story not found: {}", id))?;

    let order = story.add_page(title).order;
    store
        .update_story(story)
        .context("Failed to update story")?;

    output.success(&format!(
        "Added page {} to story {}",
        order,
        short_id(&story_id)
    ));
    Ok(())
}

/// Add or remove genre tags
pub fn genre(
    store: &mut Store,
    id: String,
    add: Vec<Genre>,
    remove: Vec<Genre>,
    output: &Output,
) -> Result<()> {
    if add.is_empty() && remove.is_empty() {
        bail!("Nothing to change. Pass --add or --remove.");
    }

    let story_id = resolve_story_id(&id, store)?;
    let mut story = store
        .story(&story_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Story not found: {}", id))?;

    for genre in add {
        story.add_genre(genre);
    }
    for genre in remove {
        story.remove_genre(genre);
    }

    store
        .update_story(story)
        .context("Failed to update story")?;

    output.success(&format!("Updated genres on {}", short_id(&story_id)));
    Ok(())
}

/// Delete a story (with confirmation)
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let story_id = resolve_story_id(&id, store)?;
    let story = store
        .story(&story_id)
        .ok_or_else(|| anyhow::anyhow!("Story not found: {}", id))?;

    if output.should_prompt() {
        println!("Delete story: {} - {}", short_id(&story.id), story.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = store
        .delete_story(&story_id)
        .context("Failed to delete story")?;

    output.success(&format!("Deleted story: {}", removed.title));
    Ok(())
}

/// Move a story into a folder, or to the root
pub fn mv(store: &mut Store, id: String, to: Option<String>, output: &Output) -> Result<()> {
    let story_id = resolve_story_id(&id, store)?;
    let target = match to {
        Some(ref f) => Some(resolve_folder_id(f, store)?),
        None => None,
    };

    store
        .move_story(&story_id, target.as_deref())
        .context("Failed to move story")?;

    let destination = target
        .as_deref()
        .map(short_id)
        .unwrap_or("root");
    output.success(&format!(
        "Moved story {} to {}",
        short_id(&story_id),
        destination
    ));
    Ok(())
}
