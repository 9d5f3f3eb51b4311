use crate::constant::NO_RECENT_MAIL;

use super::{build_query, MailMessage, MailService};

/// Builds the plain-text mail digest for the last `window_hours`.
///
/// Never fails: a failed listing becomes an `Error fetching emails: ...`
/// digest, and a message that can't be retrieved is logged and left out.
pub async fn summarize<S>(service: &S, window_hours: u32) -> String
where
    S: MailService + ?Sized,
{
    let query = build_query(window_hours);
    tracing::info!("Fetching emails matching {:?}", query);

    let ids = match service.list_messages(&query).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!("Failed to list emails: {}", e);
            return format!("Error fetching emails: {e}");
        }
    };

    if ids.is_empty() {
        return NO_RECENT_MAIL.to_string();
    }

    let mut blocks = Vec::with_capacity(ids.len());
    for id in &ids {
        match service.get_message(id).await {
            Ok(detail) => {
                tracing::debug!("Fetched message {}", detail.id);
                blocks.push(MailMessage::from(detail).to_block());
            }
            Err(e) => tracing::error!("Error processing message {}: {}", id, e),
        }
    }

    tracing::info!("Summarized {} of {} emails", blocks.len(), ids.len());
    blocks.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::{AuthError, MailError};
    use crate::mail::{MessageDetail, MessageHeader, MessagePayload};

    #[derive(Default)]
    struct FakeMail {
        list_fails: bool,
        ids: Vec<String>,
        details: HashMap<String, MessageDetail>,
        queries: Mutex<Vec<String>>,
    }

    impl FakeMail {
        fn with_message(mut self, id: &str, headers: &[(&str, &str)], snippet: &str) -> Self {
            self.ids.push(id.to_string());
            self.details.insert(
                id.to_string(),
                MessageDetail {
                    id: id.to_string(),
                    snippet: snippet.to_string(),
                    payload: MessagePayload {
                        headers: headers
                            .iter()
                            .map(|(n, v)| MessageHeader {
                                name: n.to_string(),
                                value: v.to_string(),
                            })
                            .collect(),
                    },
                },
            );
            self
        }

        fn with_broken_message(mut self, id: &str) -> Self {
            self.ids.push(id.to_string());
            self
        }
    }

    #[async_trait]
    impl MailService for FakeMail {
        async fn list_messages(&self, query: &str) -> Result<Vec<String>, MailError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.list_fails {
                return Err(MailError::Auth(AuthError::Refresh("invalid_grant".into())));
            }
            Ok(self.ids.clone())
        }

        async fn get_message(&self, id: &str) -> Result<MessageDetail, MailError> {
            self.details.get(id).cloned().ok_or(MailError::Status {
                status: 404,
                body: "not found".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_no_messages() {
        let mail = FakeMail::default();
        assert_eq!(
            summarize(&mail, 24).await,
            "No new emails in the last 24 hours."
        );
    }

    #[tokio::test]
    async fn test_no_messages_literal_ignores_window() {
        let mail = FakeMail::default();
        assert_eq!(
            summarize(&mail, 72).await,
            "No new emails in the last 24 hours."
        );
        assert_eq!(
            mail.queries.lock().unwrap().as_slice(),
            ["newer_than:72h category:primary"]
        );
    }

    #[tokio::test]
    async fn test_missing_subject() {
        let mail = FakeMail::default().with_message("a", &[("From", "ada@example.com")], "hi");
        let digest = summarize(&mail, 24).await;
        assert_eq!(
            digest,
            "From: ada@example.com\nSubject: No Subject\nSnippet: hi\n---"
        );
    }

    #[tokio::test]
    async fn test_skips_broken_message() {
        let mail = FakeMail::default()
            .with_message("a", &[("From", "a@x"), ("Subject", "one")], "s1")
            .with_broken_message("b")
            .with_message("c", &[("From", "c@x"), ("Subject", "three")], "s3");

        let digest = summarize(&mail, 24).await;
        assert_eq!(
            digest,
            "From: a@x\nSubject: one\nSnippet: s1\n---\nFrom: c@x\nSubject: three\nSnippet: s3\n---"
        );
    }

    #[tokio::test]
    async fn test_list_failure_degrades() {
        let mail = FakeMail {
            list_fails: true,
            ..Default::default()
        };
        let digest = summarize(&mail, 24).await;
        assert!(digest.starts_with("Error fetching emails: "), "{digest}");
        assert!(digest.contains("invalid_grant"));
    }
}
