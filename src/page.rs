use chrono::NaiveDate;
use html_escape::encode_quoted_attribute;

use std::fmt::Write;
use std::time::Duration;

use crate::config::Config;
use crate::constant::*;
use crate::error::FetchError;
use crate::feed::{fetch, format_entries};

#[derive(Debug)]
pub struct FeedFailure {
    pub url: String,
    pub error: FetchError,
}

/// An assembled document plus the feeds that were left out of it.
#[derive(Debug)]
pub struct Page {
    pub html: String,
    pub failures: Vec<FeedFailure>,
}

pub struct PageAssembler {
    title: String,
    briefing_html: Option<String>,
    feed_urls: Vec<String>,
    timeout: Duration,
    user_agent: String,
    entry_limit: usize,
}

impl PageAssembler {
    fn new(
        title: String,
        briefing_html: Option<String>,
        feed_urls: Vec<String>,
        timeout: Duration,
        user_agent: String,
        entry_limit: usize,
    ) -> Self {
        Self {
            title,
            briefing_html,
            feed_urls,
            timeout,
            user_agent,
            entry_limit,
        }
    }

    /// Builds the page for `today`. Feeds are fetched one at a time in the
    /// order given; a feed that fails is logged and omitted. The document
    /// shell is always closed.
    pub async fn assemble(&self, today: NaiveDate) -> Page {
        let title = encode_quoted_attribute(&self.title);
        let mut html = format!(
            r#"<html><head><meta charset="UTF-8"><title>{title}</title></head><body><h1>{title} - {date}</h1>"#,
            date = today.format("%Y-%m-%d"),
        );

        if let Some(briefing) = &self.briefing_html {
            html.push_str(briefing);
        }

        let mut failures = vec![];
        for url in &self.feed_urls {
            match fetch(url, self.timeout, &self.user_agent).await {
                Ok(feed) => {
                    tracing::info!("Fetched feed {:?} with {} entries", feed.title, feed.entries.len());
                    let _ = write!(
                        html,
                        "<h2>{}</h2>{}",
                        encode_quoted_attribute(&feed.title),
                        format_entries(&feed.entries, self.entry_limit),
                    );
                }
                Err(error) => {
                    tracing::error!("Error processing feed {}: {}", url, error);
                    failures.push(FeedFailure {
                        url: url.clone(),
                        error,
                    });
                }
            }
        }

        html.push_str("</body></html>");

        Page { html, failures }
    }
}

pub struct PageBuilder {
    title: String,
    briefing_html: Option<String>,
    feed_urls: Vec<String>,
    timeout: Duration,
    user_agent: String,
    entry_limit: usize,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_PAGE_TITLE.to_string(),
            briefing_html: None,
            feed_urls: vec![],
            timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            entry_limit: DEFAULT_ENTRY_LIMIT,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_title(&config.page_title)
            .with_timeout(config.feed_timeout())
            .with_user_agent(&config.feed_user_agent)
            .with_entry_limit(config.feed_entry_limit)
    }

    pub fn build(self) -> PageAssembler {
        PageAssembler::new(
            self.title,
            self.briefing_html,
            self.feed_urls,
            self.timeout,
            self.user_agent,
            self.entry_limit,
        )
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Injected verbatim right after the `<h1>`. Empty input is ignored.
    pub fn with_briefing(mut self, html: Option<String>) -> Self {
        self.briefing_html = html.filter(|h| !h.is_empty());
        self
    }

    pub fn with_feed(mut self, url: impl Into<String>) -> Self {
        self.feed_urls.push(url.into());
        self
    }

    pub fn with_feeds<I, S>(self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        urls.into_iter().fold(self, |builder, url| builder.with_feed(url))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_entry_limit(mut self, limit: usize) -> Self {
        self.entry_limit = limit;
        self
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
