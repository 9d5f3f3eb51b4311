use std::time::Duration;

use crate::client::build_feed_client;
use crate::error::FetchError;

use super::{FeedEntry, ParsedFeed};

/// Fetches one feed and parses it as RSS, falling back to Atom.
///
/// `timeout` bounds connect and read together. No caching, no retries.
pub async fn fetch(
    url: &str,
    timeout: Duration,
    user_agent: &str,
) -> Result<ParsedFeed, FetchError> {
    let client = build_feed_client(timeout, user_agent)?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let content = response.bytes().await?;
    tracing::debug!("Fetched {} bytes from {}", content.len(), url);

    parse_feed(&content)
}

pub fn parse_feed(content: &[u8]) -> Result<ParsedFeed, FetchError> {
    let rss_err = match rss::Channel::read_from(content) {
        Ok(channel) => return from_rss_channel(&channel),
        Err(e) => e,
    };

    let atom_err = match atom_syndication::Feed::read_from(content) {
        Ok(feed) => return from_atom_feed(&feed),
        Err(e) => e,
    };

    Err(FetchError::ParseError(format!(
        "not an RSS feed ({rss_err}) nor an Atom feed ({atom_err})"
    )))
}

fn from_rss_channel(channel: &rss::Channel) -> Result<ParsedFeed, FetchError> {
    let title = required_title(channel.title())?;

    let entries = channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().map(str::to_string),
            link: item.link().map(str::to_string),
            summary: item
                .description()
                .or_else(|| item.content())
                .unwrap_or_default()
                .to_string(),
        })
        .collect();

    Ok(ParsedFeed { title, entries })
}

fn from_atom_feed(feed: &atom_syndication::Feed) -> Result<ParsedFeed, FetchError> {
    let title = required_title(feed.title().as_str())?;

    let entries = feed
        .entries()
        .iter()
        .map(|entry| {
            let link = entry
                .links()
                .iter()
                .find(|l| l.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|l| l.href().to_string());

            let summary = entry
                .summary()
                .map(|s| s.as_str())
                .or_else(|| entry.content().and_then(|c| c.value()))
                .unwrap_or_default()
                .to_string();

            let title = Some(entry.title().as_str())
                .filter(|t| !t.trim().is_empty())
                .map(str::to_string);

            FeedEntry {
                title,
                link,
                summary,
            }
        })
        .collect();

    Ok(ParsedFeed { title, entries })
}

fn required_title(title: &str) -> Result<String, FetchError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(FetchError::ParseError("feed has no title".into()));
    }
    Ok(title.to_string())
}
