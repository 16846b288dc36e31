use crate::types::{AggregatorError, RawFeedItem, Result};
use chrono::SecondsFormat;
use feed_rs::parser;
use tracing::debug;

/// Maps RSS/Atom/JSON feed documents onto `RawFeedItem`s.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a feed body. Entries keep the order the source listed them in.
    pub fn parse_feed(&self, content: &[u8]) -> Result<Vec<RawFeedItem>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let items: Vec<RawFeedItem> = feed.entries.into_iter().map(Self::parse_entry).collect();

        debug!("Parsed feed with {} entries", items.len());
        Ok(items)
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> RawFeedItem {
        let title = entry.title.map(|t| t.content);
        let link = select_entry_link(&entry.links);

        let published_at = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true));

        let content = entry.content.and_then(|c| c.body);
        let summary = entry.summary.map(|s| s.content);

        // feed-rs files RSS <description> under summary; media descriptions
        // are the only other body text a feed can carry.
        let description = entry
            .media
            .into_iter()
            .find_map(|m| m.description)
            .map(|d| d.content);

        RawFeedItem {
            title,
            link,
            published_at,
            content,
            summary,
            description,
        }
    }
}

/// The entry's permalink: the first `alternate` (or rel-less) link, else the
/// first link with an href. Atom entries often list `replies`/`edit` first.
pub fn select_entry_link(links: &[feed_rs::model::Link]) -> Option<String> {
    let non_empty = || links.iter().filter(|l| !l.href.trim().is_empty());

    non_empty()
        .find(|l| {
            let rel = l.rel.as_deref().unwrap_or("");
            rel.is_empty() || rel.eq_ignore_ascii_case("alternate")
        })
        .or_else(|| non_empty().next())
        .map(|l| l.href.trim().to_string())
}
