//! Community feed command handlers

use std::time::Duration;

use anyhow::{Context, Result};

use pluma_core::{Config, FeedReader};
use tracing::info;

use crate::commands::open_remote;
use crate::output::Output;

/// Fetch and print the community feed, newest first
pub async fn list(config: &Config, output: &Output) -> Result<()> {
    let remote = open_remote(config)?;
    let reader = FeedReader::new(remote);

    let records = reader
        .refresh()
        .await
        .context("Failed to fetch community feed")?;

    output.print_feed(&records);
    Ok(())
}

/// Watch the community feed for changes until interrupted
///
/// Subscribes before the initial fetch so a change landing during that
/// fetch still triggers a refresh instead of being lost.
pub async fn watch(config: &Config, output: &Output) -> Result<()> {
    let remote = open_remote(config)?;
    let mut reader = FeedReader::new(remote);
    reader.subscribe();

    let mut last = reader
        .refresh()
        .await
        .context("Failed to fetch community feed")?;
    output.print_feed(&last);
    output.message("Watching for changes. Press Ctrl-C to stop.");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(Duration::from_millis(500)) => {
                let records = reader.records().await;
                // In-place edits keep the count; compare contents
                if records != last {
                    last = records;
                    output.print_feed(&last);
                }
            }
        }
    }

    reader.unsubscribe();
    info!("Stopped watching feed");
    Ok(())
}
