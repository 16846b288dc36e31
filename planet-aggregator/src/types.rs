use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One entry of the feed list: a display name and the feed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub name: String,
    pub url: String,
}

impl FeedDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// An entry as it came out of the parsed feed, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeedItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

/// The latest post of one feed, as persisted in the output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub source_name: String,
    pub source_url: String,
    pub title: String,
    pub link: String,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    pub snippet: String,
}

/// Ordered output of one run, newest first.
pub type OutputDataset = Vec<OutputRecord>;

/// Serializes timestamps as `2024-01-01T00:00:00.000Z`.
pub mod iso_millis {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn format(date: &DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
    pub max_feed_size_mb: usize,
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("planet-aggregator/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: 30,
            max_redirects: 10,
            max_feed_size_mb: 10,
            concurrency: 8,
        }
    }
}

impl FetchConfig {
    /// Apply command-line overrides. Concurrency and timeout are clamped to at
    /// least 1; a zero timeout would fail every request.
    pub fn with_overrides(mut self, concurrency: Option<usize>, timeout_seconds: Option<u64>, user_agent: Option<String>) -> Self {
        if let Some(concurrency) = concurrency {
            self.concurrency = concurrency.max(1);
        }
        if let Some(timeout) = timeout_seconds {
            self.timeout_seconds = timeout.max(1);
        }
        if let Some(user_agent) = user_agent {
            self.user_agent = user_agent;
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("Feed '{name}' failed: {message}")]
    FeedFailed { name: String, message: String },

    #[error("Failed to load feed list {}: {source}", .path.display())]
    FeedList {
        path: PathBuf,
        #[source]
        source: Box<AggregatorError>,
    },

    #[error("Failed to write dataset {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AggregatorError {
    pub fn feed_failed(descriptor: &FeedDescriptor, err: impl std::fmt::Display) -> Self {
        Self::FeedFailed {
            name: descriptor.name.clone(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
