//! # roster-cli: CLI Tool for Roster
//!
//! Provides the `roster` command-line interface over the contact and group
//! crates. Inputs are YAML or JSON files; outputs go to stdout.
//!
//! ## Subcommands
//!
//! - `roster contacts`: Normalize an address book, resolve it against a
//!   directory, and print the sorted result as JSON.
//! - `roster group-diff`: Describe the change between two group snapshots.
//!
//! ```bash
//! roster contacts --contacts book.yaml --directory directory.yaml --ordering last-first
//! roster group-diff --old before.json --new after.json --names names.yaml
//! roster -v --config roster.yaml group-diff --new after.json --info
//! ```

pub mod contacts;
pub mod group_diff;

use std::path::Path;

use anyhow::{Context, Result};
use roster_core::RosterConfig;
use serde::de::DeserializeOwned;

/// Load the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<RosterConfig> {
    match path {
        Some(path) => RosterConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        None => Ok(RosterConfig::default()),
    }
}

/// Read a YAML or JSON input file. `.json` files are parsed as JSON,
/// everything else as YAML.
pub fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in {}", path.display()))
    }
}
