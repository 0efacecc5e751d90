//! Configuration loading for Pulsar applications
//!
//! Provides utilities for loading configuration files from the shared
//! Pulsar config directory (~/.config/pulsar/).
//!
//! Call [`init`] at application startup to bootstrap the config directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Initialize the Pulsar config directory.
///
/// Creates ~/.config/pulsar/ if it doesn't exist.
/// Call this once at application startup.
pub fn init() -> Result<PathBuf> {
    ensure_config_dir()
}

/// Get the Pulsar config directory (~/.config/pulsar/)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pulsar"))
}

/// Get the path to a config file within the Pulsar config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Resolve a path relative to the user's home directory
pub fn home_path(relative: &str) -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(relative))
}

/// Load and parse a JSON config file from the Pulsar config directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Check if a config file exists in the Pulsar config directory
pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|p| p.exists())
}

/// Ensure the Pulsar config directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let dir = config_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with("pulsar"));
    }

    #[test]
    fn test_config_path() {
        let path = config_path("test.json");
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.ends_with("pulsar/test.json"));
    }

    #[test]
    fn test_home_path() {
        let path = home_path("Dropbox/Records");
        assert!(path.is_some());
        assert!(path.unwrap().ends_with("Dropbox/Records"));
    }
}
