use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use tokio::sync::Mutex;

use std::path::Path;

use crate::constant::DEFAULT_GOOGLE_TOKEN_URI;
use crate::error::{AuthError, MailError};

use super::{MailService, MessageDetail};

/// Persisted "authorized user" session material, as written by the
/// one-time OAuth consent flow.
#[derive(Debug, Clone, Deserialize)]
struct AuthorizedUser {
    token: Option<String>,
    refresh_token: String,
    token_uri: Option<String>,
    client_id: String,
    client_secret: String,
    expiry: Option<String>,
}

#[derive(Debug, Default)]
struct AccessToken {
    token: Option<String>,
    expiry: Option<DateTime<Utc>>,
}

impl AccessToken {
    fn usable(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.token.as_deref()?;
        match self.expiry {
            Some(expiry) if expiry - Duration::seconds(60) <= now => None,
            _ => Some(token),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

pub struct GmailClient {
    client: Client,
    api_base: String,
    user: AuthorizedUser,
    access: Mutex<AccessToken>,
}

impl GmailClient {
    /// Opens the session stored at `path`. A missing or unusable file is
    /// fatal; nothing here provisions credentials.
    ///
    /// `client` carries the request timeout for every provider call,
    /// token refresh included.
    pub fn from_token_file(
        path: impl AsRef<Path>,
        api_base: impl Into<String>,
        client: Client,
    ) -> Result<Self, AuthError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AuthError::Missing(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        let user: AuthorizedUser =
            serde_json::from_str(&raw).map_err(|e| AuthError::Malformed(e.to_string()))?;

        let expiry = match user.expiry.as_deref() {
            Some(s) => Some(parse_expiry(s).ok_or_else(|| {
                AuthError::Malformed(format!("unrecognised expiry timestamp {s:?}"))
            })?),
            None => None,
        };

        let access = AccessToken {
            token: user.token.clone(),
            expiry,
        };

        tracing::debug!("Loaded mail session from {}", path.display());

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            user,
            access: Mutex::new(access),
        })
    }

    async fn access_token(&self) -> Result<String, AuthError> {
        let mut access = self.access.lock().await;
        if let Some(token) = access.usable(Utc::now()) {
            return Ok(token.to_string());
        }

        tracing::info!("Refreshing mail access token");

        let token_uri = self
            .user
            .token_uri
            .as_deref()
            .unwrap_or(DEFAULT_GOOGLE_TOKEN_URI);
        let response = self
            .client
            .post(token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.user.refresh_token.as_str()),
                ("client_id", self.user.client_id.as_str()),
                ("client_secret", self.user.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Refresh(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Refresh(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Refresh(format!("HTTP {status}: {body}")));
        }

        let refreshed: RefreshResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Refresh(e.to_string()))?;

        access.expiry = refreshed
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));
        access.token = Some(refreshed.access_token.clone());

        Ok(refreshed.access_token)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MailError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MailService for GmailClient {
    async fn list_messages(&self, query: &str) -> Result<Vec<String>, MailError> {
        let url = format!("{}/gmail/v1/users/me/messages", self.api_base);
        let list: ListResponse = self.get_json(&url, &[("q", query)]).await?;

        Ok(list.messages.into_iter().map(|m| m.id).collect())
    }

    async fn get_message(&self, id: &str) -> Result<MessageDetail, MailError> {
        let url = format!("{}/gmail/v1/users/me/messages/{}", self.api_base, id);
        self.get_json(&url, &[("format", "full")]).await
    }
}

async fn check_status(response: Response) -> Result<String, MailError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(MailError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

fn parse_expiry(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.and_utc())
        })
}
