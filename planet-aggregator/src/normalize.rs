use crate::sanitize::{sanitize, truncate_snippet};
use crate::types::{FeedDescriptor, OutputRecord, RawFeedItem};
use chrono::{DateTime, SubsecRound, Utc};

pub const TITLE_FALLBACK: &str = "No Title Available";

/// Build the output record for a feed from its newest entry.
///
/// Returns `None` for a feed without entries. Missing publication dates fall
/// back to the current time.
pub fn normalize(descriptor: &FeedDescriptor, items: &[RawFeedItem]) -> Option<OutputRecord> {
    normalize_at(descriptor, items, Utc::now())
}

/// Same as [`normalize`] with an explicit fallback time.
pub fn normalize_at(descriptor: &FeedDescriptor, items: &[RawFeedItem], now: DateTime<Utc>) -> Option<OutputRecord> {
    let item = items.first()?;

    let title = match item.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => TITLE_FALLBACK.to_string(),
    };

    let date = item
        .published_at
        .as_deref()
        .and_then(parse_published)
        .unwrap_or(now)
        .trunc_subsecs(3);

    let body = [&item.content, &item.summary, &item.description]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .find(|text| !text.is_empty());

    Some(OutputRecord {
        source_name: descriptor.name.clone(),
        source_url: descriptor.url.clone(),
        title,
        link: item.link.clone().unwrap_or_default(),
        date,
        snippet: truncate_snippet(&sanitize(body)),
    })
}

/// Accepts RFC 3339 (Atom, JSON Feed) and RFC 2822 (RSS pubDate).
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
