pub mod fetcher;
pub mod format;

pub use fetcher::fetch;
pub use format::format_entries;

/// One entry of a syndication feed, in document order.
///
/// `summary` is kept exactly as the publisher sent it and may contain markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub title: String,
    pub entries: Vec<FeedEntry>,
}
