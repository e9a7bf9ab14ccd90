//! Display metrics derived from entity content
//!
//! Pure helpers: word counts over the opaque markup blobs, human-readable
//! sizes, and date formatting. No state, no I/O.

use chrono::{DateTime, Utc};

use crate::models::Story;

/// Strip markup tags, replacing each tag with a space so adjacent
/// words in neighboring elements don't run together.
pub fn strip_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;

    for c in markup.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text
}

/// Count whitespace-separated words in a markup blob
pub fn count_words(markup: &str) -> usize {
    strip_markup(markup).split_whitespace().count()
}

/// Total word count across all pages of a story
pub fn story_word_count(story: &Story) -> usize {
    story.pages.iter().map(|p| count_words(&p.content)).sum()
}

/// Format a byte count for display ("512 B", "1.2 KB", "3.4 MB")
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes = bytes as f64;
    if bytes < KB {
        format!("{} B", bytes as u64)
    } else if bytes < MB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes / MB)
    }
}

/// Format a timestamp for display
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
