//! Error types, one enum per operation family.
//!
//! Feed and mail errors are recoverable: the page assembler and the mail
//! digest log them and move on. Auth, generation and config errors abort
//! the run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("invalid feed: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(e)
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("session material not found at {0}; run the mail authorization setup first")]
    Missing(String),

    #[error("failed to read session material: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("malformed session material: {0}")]
    Malformed(String),

    #[error("failed to refresh access token: {0}")]
    Refresh(String),
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("mail request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("mail provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected mail provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text completion failed: {0}")]
    Api(#[from] async_openai::error::OpenAIError),

    #[error("no content in text completion response")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("input is empty or contains only whitespace")]
    EmptyInput,

    #[error("invalid selector: {0}")]
    Selector(String),
}
