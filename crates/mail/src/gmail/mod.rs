//! Gmail API integration
//!
//! This module provides:
//! - OAuth2 authentication flow
//! - Gmail API client for fetching label metadata
//! - Response normalization to domain models

mod auth;
mod client;
mod normalize;

pub use auth::{AuthConfig, AuthorizationPrompt, BrowserPrompt, GmailAuth, TokenResponse};
pub use client::GmailClient;
pub use normalize::{
    MalformedResponse, normalize_label, normalize_label_detail, normalize_message_list,
};

/// Gmail API response types
pub mod api {
    use serde::Deserialize;

    /// Response from listing labels
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListLabelsResponse {
        pub labels: Option<Vec<LabelRef>>,
    }

    /// Label entry from the label listing (ID and display name)
    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LabelRef {
        pub id: Option<String>,
        pub name: Option<String>,
    }

    /// Full label detail including message and thread counters
    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LabelDetailResponse {
        pub id: Option<String>,
        pub name: Option<String>,
        pub messages_total: Option<u32>,
        pub messages_unread: Option<u32>,
        pub threads_total: Option<u32>,
        pub threads_unread: Option<u32>,
    }

    /// Response from listing messages
    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListMessagesResponse {
        pub messages: Option<Vec<MessageRef>>,
        pub next_page_token: Option<String>,
        pub result_size_estimate: Option<u32>,
    }

    /// Reference to a message (just ID and thread ID)
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageRef {
        pub id: Option<String>,
        pub thread_id: Option<String>,
    }
}
