//! Message data model and opening-message deduplication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::inquiry::{Inquiry, InquiryId};

/// Reserved ID of the synthetic opening message.
///
/// Never persisted; the record carrying it is rebuilt from the inquiry on
/// every fetch.
pub const SYNTHETIC_MESSAGE_ID: &str = "initial-msg";

/// Dedup tolerance between the inquiry's creation time and the timestamp of
/// a persisted copy of its opening message, in milliseconds.
///
/// The inquiry and the first real message are written by different code
/// paths, so their timestamps can disagree by clock or serialization skew.
pub const DEDUP_WINDOW_MS: i64 = 5000;

/// Unique identifier for a message within an inquiry thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Create a new message ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One chat message in an inquiry thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within the thread. [`SYNTHETIC_MESSAGE_ID`] marks the
    /// reconstructed opening message.
    pub id: MessageId,
    /// Thread this message belongs to.
    pub inquiry_id: InquiryId,
    /// Author account.
    pub sender_id: AccountId,
    /// Text content.
    pub content: String,
    /// Creation timestamp; threads display in ascending order of this.
    pub created_at: DateTime<Utc>,
    /// Whether the counterparty's copy has been read.
    #[serde(default)]
    pub read: bool,
}

impl Message {
    /// Reconstruct the opening message from the inquiry's application text.
    ///
    /// The sender is the applicant. Inquiries submitted before the applicant
    /// had an account carry no applicant ID; `applicant_hint` fills the gap
    /// when the viewer knows who the applicant is (their own session, say).
    #[must_use]
    pub fn synthetic(inquiry: &Inquiry, applicant_hint: Option<&AccountId>) -> Self {
        let sender_id = inquiry
            .applicant_id
            .clone()
            .or_else(|| applicant_hint.cloned())
            .unwrap_or_else(|| AccountId::new(""));
        Self {
            id: MessageId::new(SYNTHETIC_MESSAGE_ID),
            inquiry_id: inquiry.id.clone(),
            sender_id,
            content: inquiry.message.clone(),
            created_at: inquiry.created_at,
            read: true,
        }
    }

    /// Whether this is the reconstructed opening message.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.id.as_str() == SYNTHETIC_MESSAGE_ID
    }
}

/// Whether the synthetic opening message already exists among the persisted
/// messages and must not be shown again.
///
/// A persisted message counts as a duplicate when its text is identical and
/// its timestamp falls within [`DEDUP_WINDOW_MS`] of the synthetic one, in
/// either direction (bounds inclusive).
#[must_use]
pub fn should_suppress_synthetic(synthetic: &Message, persisted: &[Message]) -> bool {
    persisted.iter().any(|m| {
        m.content == synthetic.content
            && (m.created_at - synthetic.created_at)
                .num_milliseconds()
                .abs()
                <= DEDUP_WINDOW_MS
    })
}

/// Combine the synthetic opening message (if any, and not suppressed) with
/// the persisted messages, ordered by timestamp ascending.
#[must_use]
pub fn merge_thread(synthetic: Option<Message>, persisted: Vec<Message>) -> Vec<Message> {
    let mut merged = persisted;
    if let Some(opening) = synthetic {
        if !should_suppress_synthetic(&opening, &merged) {
            merged.insert(0, opening);
        }
    }
    // Prepending is not enough: the opening message is not always the oldest.
    merged.sort_by_key(|m| m.created_at);
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn at(iso: &str) -> DateTime<Utc> {
        iso.parse().unwrap()
    }

    fn persisted(id: &str, content: &str, created_at: DateTime<Utc>) -> Message {
        Message {
            id: MessageId::new(id),
            inquiry_id: InquiryId::new("inq-1"),
            sender_id: AccountId::new("applicant-1"),
            content: content.to_string(),
            created_at,
            read: true,
        }
    }

    fn opening(content: &str, created_at: DateTime<Utc>) -> Message {
        persisted(SYNTHETIC_MESSAGE_ID, content, created_at)
    }

    #[test]
    fn test_no_persisted_messages_keeps_synthetic() {
        let t = at("2024-01-01T10:00:00Z");
        let merged = merge_thread(Some(opening("Hello", t)), Vec::new());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id.as_str(), "initial-msg");
        assert_eq!(merged[0].content, "Hello");
        assert_eq!(merged[0].created_at, t);
    }

    #[test]
    fn test_duplicate_within_window_suppresses_synthetic() {
        // Persisted copy written 3s after the inquiry, same text.
        let merged = merge_thread(
            Some(opening("Hello", at("2024-01-01T10:00:00Z"))),
            vec![persisted("m1", "Hello", at("2024-01-01T10:00:03Z"))],
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id.as_str(), "m1");
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let t = at("2024-01-01T10:00:00Z");
        let synthetic = opening("Hello", t);

        let exactly = vec![persisted("m1", "Hello", t + TimeDelta::milliseconds(5000))];
        assert!(should_suppress_synthetic(&synthetic, &exactly));

        let earlier = vec![persisted("m1", "Hello", t - TimeDelta::milliseconds(5000))];
        assert!(should_suppress_synthetic(&synthetic, &earlier));

        let just_outside = vec![persisted("m1", "Hello", t + TimeDelta::milliseconds(5001))];
        assert!(!should_suppress_synthetic(&synthetic, &just_outside));
    }

    #[test]
    fn test_different_text_never_suppresses() {
        let t = at("2024-01-01T10:00:00Z");
        let synthetic = opening("Hello", t);
        let same_instant = vec![persisted("m1", "Hello!", t)];

        assert!(!should_suppress_synthetic(&synthetic, &same_instant));
    }

    #[test]
    fn test_merged_list_is_sorted_ascending() {
        // Synthetic message is newer than a persisted one, so a plain
        // prepend would break the order.
        let merged = merge_thread(
            Some(opening("Hello", at("2024-01-01T10:00:30Z"))),
            vec![
                persisted("m2", "Anyone there?", at("2024-01-01T10:02:00Z")),
                persisted("m1", "Earlier note", at("2024-01-01T10:00:00Z")),
            ],
        );

        assert_eq!(
            merged.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            ["m1", "initial-msg", "m2"]
        );
        for pair in merged.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }
}
