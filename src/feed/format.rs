use std::fmt::Write;

use html_escape::encode_quoted_attribute;

use crate::constant::{MISSING_LINK, MISSING_TITLE};

use super::FeedEntry;

/// Renders the first `limit` entries as a `<ul>` list.
///
/// Titles and links are escaped. Summaries are embedded as-is: publishers
/// ship markup in them and rendering it is intended, so any script in a
/// summary is the publisher's responsibility.
pub fn format_entries(entries: &[FeedEntry], limit: usize) -> String {
    let mut html = String::from("<ul>");

    for entry in entries.iter().take(limit) {
        let title = entry.title.as_deref().unwrap_or(MISSING_TITLE);
        let link = entry.link.as_deref().unwrap_or(MISSING_LINK);

        let _ = write!(
            html,
            "<li><a href='{link}'>{title}</a><p>{summary}</p></li>",
            link = encode_quoted_attribute(link),
            title = encode_quoted_attribute(title),
            summary = entry.summary,
        );
    }

    html.push_str("</ul>");
    html
}
