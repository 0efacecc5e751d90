//! Gmail API response normalization
//!
//! Converts Gmail API responses to validated domain models. Responses
//! missing a required field fail with [`MalformedResponse`].

use anyhow::Result;

use super::api::{LabelDetailResponse, LabelRef, ListMessagesResponse};
use crate::models::{Label, LabelDetail, LabelId, MessageListResult};

/// Error indicating an API response was missing a required field
#[derive(Debug, thiserror::Error)]
#[error("Malformed {endpoint} response: missing `{field}`")]
pub struct MalformedResponse {
    pub endpoint: &'static str,
    pub field: &'static str,
}

fn require<T>(
    value: Option<T>,
    endpoint: &'static str,
    field: &'static str,
) -> Result<T, MalformedResponse> {
    value.ok_or(MalformedResponse { endpoint, field })
}

/// Normalize a label listing entry
pub fn normalize_label(raw: LabelRef) -> Result<Label> {
    let id = require(raw.id, "labels.list", "id")?;
    let name = require(raw.name, "labels.list", "name")?;
    Ok(Label::new(id, name))
}

/// Normalize a label detail response
pub fn normalize_label_detail(raw: LabelDetailResponse) -> Result<LabelDetail> {
    Ok(LabelDetail {
        id: LabelId::new(require(raw.id, "labels.get", "id")?),
        name: require(raw.name, "labels.get", "name")?,
        threads_total: require(raw.threads_total, "labels.get", "threadsTotal")?,
        threads_unread: require(raw.threads_unread, "labels.get", "threadsUnread")?,
    })
}

/// Normalize a message listing response
pub fn normalize_message_list(raw: ListMessagesResponse) -> Result<MessageListResult> {
    Ok(MessageListResult {
        result_size_estimate: require(
            raw.result_size_estimate,
            "messages.list",
            "resultSizeEstimate",
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        let raw = LabelRef {
            id: Some("Label_123".to_string()),
            name: Some("Receipts".to_string()),
        };
        let label = normalize_label(raw).unwrap();
        assert_eq!(label.id.as_str(), "Label_123");
        assert_eq!(label.name, "Receipts");
    }

    #[test]
    fn test_normalize_label_missing_name() {
        let raw = LabelRef {
            id: Some("Label_123".to_string()),
            name: None,
        };
        let err = normalize_label(raw).unwrap_err();
        let malformed = err.downcast_ref::<MalformedResponse>().unwrap();
        assert_eq!(malformed.endpoint, "labels.list");
        assert_eq!(malformed.field, "name");
    }

    #[test]
    fn test_normalize_label_detail() {
        let raw = LabelDetailResponse {
            id: Some("INBOX".to_string()),
            name: Some("INBOX".to_string()),
            messages_total: Some(120),
            messages_unread: Some(7),
            threads_total: Some(80),
            threads_unread: Some(5),
        };
        let detail = normalize_label_detail(raw).unwrap();
        assert_eq!(detail.id.as_str(), "INBOX");
        assert_eq!(detail.threads_total, 80);
        assert_eq!(detail.threads_unread, 5);
    }

    #[test]
    fn test_normalize_label_detail_missing_counts() {
        let raw = LabelDetailResponse {
            id: Some("INBOX".to_string()),
            name: Some("INBOX".to_string()),
            ..Default::default()
        };
        let err = normalize_label_detail(raw).unwrap_err();
        let malformed = err.downcast_ref::<MalformedResponse>().unwrap();
        assert_eq!(malformed.endpoint, "labels.get");
        assert_eq!(malformed.field, "threadsTotal");
    }

    #[test]
    fn test_normalize_message_list() {
        let raw = ListMessagesResponse {
            result_size_estimate: Some(321),
            ..Default::default()
        };
        let result = normalize_message_list(raw).unwrap();
        assert_eq!(result.result_size_estimate, 321);
    }

    #[test]
    fn test_normalize_message_list_missing_estimate() {
        let raw = ListMessagesResponse::default();
        let err = normalize_message_list(raw).unwrap_err();
        let malformed = err.downcast_ref::<MalformedResponse>().unwrap();
        assert_eq!(malformed.field, "resultSizeEstimate");
    }
}
