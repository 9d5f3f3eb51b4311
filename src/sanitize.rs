use scraper::{Html, Selector};

use crate::error::SanitizeError;

/// Re-serializes an HTML document with every `<img>` removed.
pub fn sanitize(input: &str) -> Result<String, SanitizeError> {
    if input.trim().is_empty() {
        return Err(SanitizeError::EmptyInput);
    }

    let mut document = Html::parse_document(input);
    let images = Selector::parse("img").map_err(|e| SanitizeError::Selector(e.to_string()))?;

    let ids: Vec<_> = document.select(&images).map(|img| img.id()).collect();
    tracing::debug!("Removing {} images", ids.len());
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    Ok(document.html())
}
