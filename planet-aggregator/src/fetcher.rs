use crate::parser::FeedParser;
use crate::traits::FeedSource;
use crate::types::{AggregatorError, FeedDescriptor, FetchConfig, RawFeedItem, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// HTTP feed retrieval. One client is shared by every concurrent fetch.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
    parser: FeedParser,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self {
            client,
            config,
            parser: FeedParser::new(),
        })
    }

    /// Download the raw feed body.
    pub async fn fetch_body(&self, url: &str) -> Result<Vec<u8>> {
        let url = validate_feed_url(url)?;
        let start_time = Instant::now();

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::HttpStatus { status: status.as_u16() });
        }

        let limit = self.config.max_feed_size_mb * 1024 * 1024;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit {
                return Err(AggregatorError::FeedTooLarge { size_mb: content_length as usize / (1024 * 1024) });
            }
        }

        let body = response.bytes().await?;
        if body.len() > limit {
            return Err(AggregatorError::FeedTooLarge { size_mb: body.len() / (1024 * 1024) });
        }

        debug!(
            "Fetched {} ({} bytes, HTTP {}) in {}ms",
            url,
            body.len(),
            status.as_u16(),
            start_time.elapsed().as_millis()
        );
        Ok(body.to_vec())
    }

    async fn fetch_items(&self, url: &str) -> Result<Vec<RawFeedItem>> {
        let body = self.fetch_body(url).await?;
        self.parser.parse_feed(&body)
    }
}

#[async_trait]
impl FeedSource for Fetcher {
    async fn fetch(&self, descriptor: &FeedDescriptor) -> Result<Vec<RawFeedItem>> {
        debug!("Fetching feed '{}': {}", descriptor.name, descriptor.url);

        self.fetch_items(&descriptor.url)
            .await
            .map_err(|e| AggregatorError::feed_failed(descriptor, e))
    }
}

/// Only absolute http(s) URLs are fetchable.
pub fn validate_feed_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str).map_err(|e| AggregatorError::InvalidUrl(format!("{}: {}", url_str, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AggregatorError::InvalidUrl(format!("{}: unsupported scheme '{}'", url_str, scheme))),
    }
}
