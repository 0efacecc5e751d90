//! Label models representing Gmail labels/folders

use serde::{Deserialize, Serialize};

/// Unique identifier for a label (Gmail label ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelId(pub String);

impl LabelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Well-known Gmail system labels
    pub const INBOX: &'static str = "INBOX";
    pub const SENT: &'static str = "SENT";
    pub const DRAFT: &'static str = "DRAFT";
    pub const TRASH: &'static str = "TRASH";
    pub const SPAM: &'static str = "SPAM";
    pub const STARRED: &'static str = "STARRED";
    pub const IMPORTANT: &'static str = "IMPORTANT";
    pub const UNREAD: &'static str = "UNREAD";
    pub const CHAT: &'static str = "CHAT";
    pub const CATEGORY_FORUMS: &'static str = "CATEGORY_FORUMS";
    pub const CATEGORY_UPDATES: &'static str = "CATEGORY_UPDATES";
    pub const CATEGORY_PERSONAL: &'static str = "CATEGORY_PERSONAL";
    pub const CATEGORY_PROMOTIONS: &'static str = "CATEGORY_PROMOTIONS";
    pub const CATEGORY_SOCIAL: &'static str = "CATEGORY_SOCIAL";
}

impl From<String> for LabelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LabelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for LabelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mail label (folder), as returned by the label listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Label ID (e.g., "INBOX", "SENT", "Label_123")
    pub id: LabelId,
    /// Display name
    pub name: String,
}

impl Label {
    /// Create a new label
    pub fn new(id: impl Into<LabelId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Per-label detail with thread counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelDetail {
    pub id: LabelId,
    pub name: String,
    /// Total number of threads carrying this label
    pub threads_total: u32,
    /// Number of unread threads carrying this label
    pub threads_unread: u32,
}
