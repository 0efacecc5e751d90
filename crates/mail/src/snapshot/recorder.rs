//! Append-only CSV snapshot recorder

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use std::fs::{self, OpenOptions};

use super::{LabelSource, SnapshotConfig};
use crate::models::LabelId;

/// Result cap for the per-label INBOX message listing.
///
/// When the true match count exceeds the cap, the recorded
/// `result_size_estimate` is an approximation.
const MESSAGE_SAMPLE_LIMIT: u32 = 500;

/// One CSV row: counts for one label at one point in time
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    pub insert_datetime: String,
    pub label_id: LabelId,
    pub label_name: String,
    pub threads_unread: u32,
    pub threads_total: u32,
    pub result_size_estimate: u32,
}

impl SnapshotRow {
    /// Column names, in output order
    pub const COLUMNS: [&'static str; 6] = [
        "insert_datetime",
        "label_id",
        "label_name",
        "threads_unread",
        "threads_total",
        "result_size_estimate",
    ];

    fn to_record(&self) -> [String; 6] {
        [
            self.insert_datetime.clone(),
            self.label_id.to_string(),
            self.label_name.clone(),
            self.threads_unread.to_string(),
            self.threads_total.to_string(),
            self.result_size_estimate.to_string(),
        ]
    }
}

/// Appends one timestamped CSV row per allow-listed label.
///
/// The header is written only when the file is first created; every
/// subsequent run appends. Runs are never deduplicated.
pub struct SnapshotRecorder {
    config: SnapshotConfig,
}

impl SnapshotRecorder {
    /// Create a new recorder
    pub fn new(config: SnapshotConfig) -> Self {
        Self { config }
    }

    /// Take one snapshot, returning the number of rows appended
    pub fn record(&self, source: &dyn LabelSource) -> Result<usize> {
        self.record_at(source, Utc::now())
    }

    /// Take one snapshot with an explicit run timestamp.
    ///
    /// Every row of the run shares `taken_at`.
    pub fn record_at(&self, source: &dyn LabelSource, taken_at: DateTime<Utc>) -> Result<usize> {
        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.config.output_dir.display()
            )
        })?;

        let labels = source.list_labels()?;
        if labels.is_empty() {
            info!("No labels found");
            return Ok(0);
        }

        let path = self.config.output_dir.join(&self.config.filename);
        let write_header = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {} for append", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        if write_header {
            writer.write_record(SnapshotRow::COLUMNS)?;
        }

        let insert_datetime = taken_at.to_rfc3339_opts(SecondsFormat::Micros, false);
        let mut appended = 0;

        for label in &labels {
            if !self.config.allow_list.contains(&label.name) {
                debug!("Skipping label {}", label.name);
                continue;
            }

            // Both fetches complete before anything is written for this
            // label, so a mid-fetch failure leaves no partial row.
            let detail = source.get_label(&label.id)?;
            let messages = source.count_inbox_messages(&label.id, MESSAGE_SAMPLE_LIMIT)?;

            let row = SnapshotRow {
                insert_datetime: insert_datetime.clone(),
                label_id: detail.id,
                label_name: detail.name,
                threads_unread: detail.threads_unread,
                threads_total: detail.threads_total,
                result_size_estimate: messages.result_size_estimate,
            };
            writer.write_record(row.to_record())?;
            appended += 1;
        }

        writer.flush()?;
        info!("Appended {} rows to {}", appended, path.display());
        Ok(appended)
    }
}
