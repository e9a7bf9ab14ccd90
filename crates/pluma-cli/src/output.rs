//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use pluma_core::metrics::{format_date, format_size, story_word_count};
use pluma_core::{CloudImage, Folder, PublishedRecord, Story};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single story with its pages
    pub fn print_story(&self, story: &Story) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", story.id);
                println!("Title:     {}", story.title);
                if !story.synopsis.is_empty() {
                    println!("Synopsis:  {}", story.synopsis);
                }
                println!("Status:    {}", story.status);
                if !story.genres.is_empty() {
                    let names: Vec<String> =
                        story.genres.iter().map(|g| g.to_string()).collect();
                    println!("Genres:    {}", names.join(", "));
                }
                if let Some(ref folder) = story.folder_id {
                    println!("Folder:    {}", folder);
                }
                println!("Words:     {}", story_word_count(story));
                println!("Published: {}", if story.is_published { "yes" } else { "no" });
                if let Some(ref author) = story.author_name {
                    println!("Author:    {}", author);
                }
                println!("Created:   {}", format_date(&story.created_at));
                println!("Updated:   {}", format_date(&story.updated_at));

                println!();
                println!("── Pages ({}) ──", story.pages.len());
                for page in story.pages_in_order() {
                    println!(
                        "[{}] {} - {} word(s)",
                        page.order,
                        page.title,
                        pluma_core::metrics::count_words(&page.content)
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(story).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", story.id);
            }
        }
    }

    /// Print a list of stories
    pub fn print_stories(&self, stories: &[&Story]) {
        match self.format {
            OutputFormat::Human => {
                if stories.is_empty() {
                    println!("No stories found.");
                    return;
                }
                for story in stories {
                    let published = if story.is_published { " [published]" } else { "" };
                    println!(
                        "{} | {} | {} | {} word(s){}",
                        short_id(&story.id),
                        truncate(&story.title, 35),
                        story.status,
                        story_word_count(story),
                        published
                    );
                }
                println!("\n{} story(ies)", stories.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(stories).unwrap());
            }
            OutputFormat::Quiet => {
                for story in stories {
                    println!("{}", story.id);
                }
            }
        }
    }

    /// Print a list of folders
    pub fn print_folders(&self, folders: &[&Folder]) {
        match self.format {
            OutputFormat::Human => {
                if folders.is_empty() {
                    println!("No folders found.");
                    return;
                }
                for folder in folders {
                    let parent = folder
                        .parent_id
                        .as_deref()
                        .map(|p| format!(" (in {})", short_id(p)))
                        .unwrap_or_default();
                    println!("{} | {}{}", short_id(&folder.id), folder.name, parent);
                }
                println!("\n{} folder(s)", folders.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(folders).unwrap());
            }
            OutputFormat::Quiet => {
                for folder in folders {
                    println!("{}", folder.id);
                }
            }
        }
    }

    /// Print the community feed
    pub fn print_feed(&self, records: &[PublishedRecord]) {
        match self.format {
            OutputFormat::Human => {
                if records.is_empty() {
                    println!("Nothing published yet.");
                    return;
                }
                for record in records {
                    println!(
                        "{} | {} | by {} | {}",
                        short_id(&record.id),
                        truncate(&record.title, 35),
                        record.author_name,
                        format_date(&record.updated_at)
                    );
                }
                println!("\n{} published work(s)", records.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(records).unwrap());
            }
            OutputFormat::Quiet => {
                for record in records {
                    println!("{}", record.id);
                }
            }
        }
    }

    /// Print stored images
    pub fn print_images(&self, images: &[CloudImage]) {
        match self.format {
            OutputFormat::Human => {
                if images.is_empty() {
                    println!("No images stored.");
                    return;
                }
                for image in images {
                    println!(
                        "{} | {} | {} | {}",
                        short_id(&image.id),
                        truncate(&image.name, 30),
                        format_size(image.size),
                        format_date(&image.created_at)
                    );
                }
                println!("\n{} image(s)", images.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(images).unwrap());
            }
            OutputFormat::Quiet => {
                for image in images {
                    println!("{}", image.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// First characters of an entity id, enough to disambiguate interactively
pub fn short_id(id: &str) -> &str {
    let max = id.len().min(18);
    &id[..max]
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("story-1712"), "story-1712");
        let long = "story-1712345678901abcdefghi";
        assert_eq!(short_id(long).len(), 18);
    }
}
