//! Mail crate - Business logic for label snapshot recording
//!
//! This crate provides platform-independent functionality including:
//! - Domain models (Label, LabelDetail, MessageListResult)
//! - Gmail API client and OAuth authentication
//! - The append-only CSV snapshot recorder
//!
//! This crate has zero UI dependencies.

pub mod config;
pub mod gmail;
pub mod models;
pub mod snapshot;

pub use config::GmailCredentials;
pub use gmail::{
    AuthConfig, AuthorizationPrompt, BrowserPrompt, GmailAuth, GmailClient, MalformedResponse,
    TokenResponse,
};
pub use models::{Label, LabelDetail, LabelId, MessageListResult};
pub use snapshot::{LabelSource, SnapshotConfig, SnapshotRecorder, SnapshotRow};
