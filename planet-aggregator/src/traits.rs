use crate::types::{FeedDescriptor, RawFeedItem, Result};
use async_trait::async_trait;

/// Something that can turn a feed descriptor into that feed's entries.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve and parse the feed behind `descriptor`.
    ///
    /// Entries come back in source order. Any failure is reported as
    /// `AggregatorError::FeedFailed` carrying the descriptor's name.
    async fn fetch(&self, descriptor: &FeedDescriptor) -> Result<Vec<RawFeedItem>>;
}
