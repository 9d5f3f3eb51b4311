pub mod digest;
pub mod gmail;

use async_trait::async_trait;
use serde::Deserialize;

use crate::constant::{NO_SUBJECT, UNKNOWN_SENDER};
use crate::error::MailError;

pub use digest::summarize;
pub use gmail::GmailClient;

/// Read-only view of a mail provider.
#[async_trait]
pub trait MailService: Send + Sync {
    /// Ids of the messages matching `query`, as the provider orders them.
    async fn list_messages(&self, query: &str) -> Result<Vec<String>, MailError>;

    async fn get_message(&self, id: &str) -> Result<MessageDetail, MailError>;
}

/// Primary-category messages newer than `hours`.
pub fn build_query(hours: u32) -> String {
    format!("newer_than:{hours}h category:primary")
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDetail {
    pub id: String,
    #[serde(default)]
    pub snippet: String,
    pub payload: MessagePayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub sender: String,
    pub subject: String,
    pub snippet: String,
}

impl MailMessage {
    pub fn to_block(&self) -> String {
        format!(
            "From: {}\nSubject: {}\nSnippet: {}\n---",
            self.sender, self.subject, self.snippet
        )
    }
}

impl From<MessageDetail> for MailMessage {
    fn from(detail: MessageDetail) -> Self {
        let mut subject = None;
        let mut sender = None;

        // Later duplicates override earlier ones.
        for header in detail.payload.headers {
            match header.name.as_str() {
                "Subject" => subject = Some(header.value),
                "From" => sender = Some(header.value),
                _ => {}
            }
        }

        MailMessage {
            sender: sender.unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
            subject: subject.unwrap_or_else(|| NO_SUBJECT.to_string()),
            snippet: detail.snippet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(headers: &[(&str, &str)]) -> MessageDetail {
        MessageDetail {
            id: "m1".into(),
            snippet: "hello there".into(),
            payload: MessagePayload {
                headers: headers
                    .iter()
                    .map(|(n, v)| MessageHeader {
                        name: n.to_string(),
                        value: v.to_string(),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_build_query() {
        assert_eq!(build_query(24), "newer_than:24h category:primary");
        assert_eq!(build_query(6), "newer_than:6h category:primary");
    }

    #[test]
    fn test_extracts_headers() {
        let message = MailMessage::from(detail(&[
            ("From", "Ada <ada@example.com>"),
            ("To", "me@example.com"),
            ("Subject", "Lunch"),
        ]));
        assert_eq!(message.sender, "Ada <ada@example.com>");
        assert_eq!(message.subject, "Lunch");
        assert_eq!(message.snippet, "hello there");
    }

    #[test]
    fn test_placeholders_when_headers_absent() {
        let message = MailMessage::from(detail(&[]));
        assert_eq!(message.sender, "Unknown Sender");
        assert_eq!(message.subject, "No Subject");
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let message = MailMessage::from(detail(&[("subject", "lower")]));
        assert_eq!(message.subject, "No Subject");
    }

    #[test]
    fn test_last_duplicate_header_wins() {
        let message = MailMessage::from(detail(&[("Subject", "one"), ("Subject", "two")]));
        assert_eq!(message.subject, "two");
    }

    #[test]
    fn test_block_format() {
        let message = MailMessage {
            sender: "a".into(),
            subject: "b".into(),
            snippet: "c".into(),
        };
        assert_eq!(message.to_block(), "From: a\nSubject: b\nSnippet: c\n---");
    }
}
