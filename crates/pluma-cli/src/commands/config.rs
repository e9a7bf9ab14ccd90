//! Configuration command handlers
//!
//! These run before a store is opened, so they take the `Config` directly.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use pluma_core::Config;

use crate::output::Output;

/// Print the effective configuration
pub fn show(config: &Config, output: &Output) -> Result<()> {
    if output.is_json() {
        let value = serde_json::json!({
            "config_file": Config::config_file_path(),
            "data_dir": config.data_dir,
            "remote_path": config.remote_path,
            "display_name": config.display_name,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Config file:  {:?}", Config::config_file_path());
    println!("Data dir:     {:?}", config.data_dir);
    match &config.remote_path {
        Some(path) => println!("Remote path:  {:?}", path),
        None => println!("Remote path:  (not set)"),
    }
    match &config.display_name {
        Some(name) => println!("Display name: {}", name),
        None => println!("Display name: (not set, publishing as anonymous)"),
    }
    Ok(())
}

/// Set a configuration value and write it back to the config file
///
/// An empty value clears optional settings.
pub fn set(config: &mut Config, key: String, value: String, output: &Output) -> Result<()> {
    match key.as_str() {
        "data_dir" => {
            if value.is_empty() {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = PathBuf::from(value);
        }
        "remote_path" => {
            config.remote_path = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        "display_name" => {
            config.display_name = if value.is_empty() { None } else { Some(value) };
        }
        other => bail!(
            "Unknown config key: {}. Valid keys: data_dir, remote_path, display_name",
            other
        ),
    }

    config.save().context("Failed to save config")?;
    output.success(&format!("Set {}", key));
    Ok(())
}
