//! Snapshot recording
//!
//! This module provides:
//! - The [`LabelSource`] seam over the label metadata API
//! - Snapshot configuration (output location, label allow-list)
//! - The recorder that appends one timestamped CSV row per matched label

mod recorder;

pub use recorder::{SnapshotRecorder, SnapshotRow};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::models::{Label, LabelDetail, LabelId, MessageListResult};

/// Output CSV filename
const SNAPSHOT_FILENAME: &str = "gmail_unread_count_v01.csv";

/// Output directory, relative to the user's home directory
const OUTPUT_SUBDIR: &str = "Dropbox/Records/PersonalData";

/// Source of label metadata for a snapshot run.
///
/// Implemented by [`crate::GmailClient`]; tests substitute a fake serving
/// fixed labels and counts.
pub trait LabelSource {
    /// List all labels for the account
    fn list_labels(&self) -> Result<Vec<Label>>;

    /// Fetch thread counts for a single label
    fn get_label(&self, id: &LabelId) -> Result<LabelDetail>;

    /// Count messages carrying both INBOX and the given label,
    /// capped at `max_results`
    fn count_inbox_messages(&self, label_id: &LabelId, max_results: u32)
    -> Result<MessageListResult>;
}

/// Configuration for the snapshot recorder, built once at startup
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Directory the CSV lives in (created if missing)
    pub output_dir: PathBuf,
    /// CSV filename within `output_dir`
    pub filename: String,
    /// Label names that produce a row; all other labels are skipped
    pub allow_list: HashSet<String>,
}

impl SnapshotConfig {
    /// Create a config with the default filename and allow-list
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            filename: SNAPSHOT_FILENAME.to_string(),
            allow_list: Self::default_allow_list(),
        }
    }

    /// Create a config writing to the default directory under $HOME
    pub fn from_home() -> Result<Self> {
        let output_dir =
            config::home_path(OUTPUT_SUBDIR).context("Could not determine home directory")?;
        Ok(Self::new(output_dir))
    }

    /// The system and category labels tracked by default
    pub fn default_allow_list() -> HashSet<String> {
        [
            LabelId::CHAT,
            LabelId::SENT,
            LabelId::INBOX,
            LabelId::IMPORTANT,
            LabelId::TRASH,
            LabelId::DRAFT,
            LabelId::SPAM,
            LabelId::CATEGORY_FORUMS,
            LabelId::CATEGORY_UPDATES,
            LabelId::CATEGORY_PERSONAL,
            LabelId::CATEGORY_PROMOTIONS,
            LabelId::CATEGORY_SOCIAL,
            LabelId::STARRED,
            LabelId::UNREAD,
        ]
        .iter()
        .map(|name| name.to_string())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let allow = SnapshotConfig::default_allow_list();
        assert_eq!(allow.len(), 14);
        assert!(allow.contains("INBOX"));
        assert!(allow.contains("CATEGORY_PROMOTIONS"));
        assert!(!allow.contains("Label_123"));
    }

    #[test]
    fn test_new_uses_default_filename() {
        let config = SnapshotConfig::new(PathBuf::from("/tmp/out"));
        assert_eq!(config.filename, "gmail_unread_count_v01.csv");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }
}
