//! Gmail API HTTP client
//!
//! Provides methods for fetching label metadata from the Gmail API.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use anyhow::{Context, Result};

use super::GmailAuth;
use super::api::{LabelDetailResponse, ListLabelsResponse, ListMessagesResponse};
use super::normalize::{normalize_label, normalize_label_detail, normalize_message_list};
use crate::models::{Label, LabelDetail, LabelId, MessageListResult};
use crate::snapshot::LabelSource;

/// Gmail API client for fetching label metadata
pub struct GmailClient {
    auth: GmailAuth,
}

impl GmailClient {
    /// Gmail API base URL
    const BASE_URL: &'static str = "https://gmail.googleapis.com/gmail/v1";

    /// Create a new Gmail client
    pub fn new(auth: GmailAuth) -> Self {
        Self { auth }
    }

    /// Resolve a valid credential up front, before any data is fetched.
    ///
    /// May prompt an interactive authorization flow on first run.
    pub fn authenticate(&self) -> Result<()> {
        self.auth.get_access_token()?;
        Ok(())
    }
}

impl LabelSource for GmailClient {
    /// List all labels in the user's mailbox
    fn list_labels(&self) -> Result<Vec<Label>> {
        let access_token = self.auth.get_access_token()?;

        let url = format!("{}/users/me/labels", Self::BASE_URL);

        let mut response = ureq::get(&url)
            .header("Authorization", &format!("Bearer {}", access_token))
            .call()
            .context("Failed to send list labels request")?;

        let raw: ListLabelsResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse labels response")?;

        raw.labels
            .unwrap_or_default()
            .into_iter()
            .map(normalize_label)
            .collect()
    }

    /// Get thread counts for a single label
    fn get_label(&self, id: &LabelId) -> Result<LabelDetail> {
        let access_token = self.auth.get_access_token()?;

        let url = format!(
            "{}/users/me/labels/{}",
            Self::BASE_URL,
            urlencoding::encode(id.as_str())
        );

        let mut response = ureq::get(&url)
            .header("Authorization", &format!("Bearer {}", access_token))
            .call()
            .context("Failed to send get label request")?;

        let raw: LabelDetailResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse label detail response")?;

        normalize_label_detail(raw)
    }

    /// Count messages carrying both INBOX and the given label
    ///
    /// # Arguments
    /// * `label_id` - The label to intersect with INBOX
    /// * `max_results` - Result cap for the listing (1-500)
    fn count_inbox_messages(
        &self,
        label_id: &LabelId,
        max_results: u32,
    ) -> Result<MessageListResult> {
        let access_token = self.auth.get_access_token()?;

        let url = format!(
            "{}/users/me/messages?labelIds={}&labelIds={}&maxResults={}",
            Self::BASE_URL,
            LabelId::INBOX,
            urlencoding::encode(label_id.as_str()),
            max_results.min(500)
        );

        let mut response = ureq::get(&url)
            .header("Authorization", &format!("Bearer {}", access_token))
            .call()
            .context("Failed to send list messages request")?;

        let raw: ListMessagesResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse list messages response")?;

        normalize_message_list(raw)
    }
}
