use crate::dataset::{load_descriptors, write_dataset};
use crate::fetcher::Fetcher;
use crate::normalize::normalize;
use crate::traits::FeedSource;
use crate::types::{FeedDescriptor, FetchConfig, OutputDataset, OutputRecord, Result};
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub feeds_total: usize,
    pub feeds_failed: usize,
    pub feeds_empty: usize,
    pub records: usize,
}

/// Result of a run: the dataset, newest first, and what happened on the way.
#[derive(Debug, Clone)]
pub struct AggregationRun {
    pub records: OutputDataset,
    pub stats: RunStats,
}

enum FeedOutcome {
    Record(OutputRecord),
    Empty,
    Failed,
}

/// Fetches every configured feed concurrently and keeps each feed's latest post.
pub struct AggregationPipeline {
    source: Arc<dyn FeedSource>,
    concurrency: usize,
}

impl AggregationPipeline {
    pub fn new(source: Arc<dyn FeedSource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    /// Pipeline over HTTP using `config` for the shared client.
    pub fn from_config(config: FetchConfig) -> Result<Self> {
        let concurrency = config.concurrency;
        let fetcher = Fetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), concurrency))
    }

    /// Process every descriptor. Feed failures are logged and skipped; they
    /// never abort the run.
    ///
    /// Records are sorted by date, newest first. Equal dates keep the order of
    /// `descriptors`.
    pub async fn run(&self, descriptors: &[FeedDescriptor]) -> AggregationRun {
        info!("Aggregating {} feeds (concurrency {})", descriptors.len(), self.concurrency);

        let mut outcomes: Vec<(usize, FeedOutcome)> = stream::iter(descriptors.iter().enumerate())
            .map(|(index, descriptor)| async move { (index, self.process(descriptor).await) })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        outcomes.sort_by_key(|(index, _)| *index);

        let mut stats = RunStats {
            feeds_total: descriptors.len(),
            ..RunStats::default()
        };
        let mut records = Vec::with_capacity(outcomes.len());
        for (_, outcome) in outcomes {
            match outcome {
                FeedOutcome::Record(record) => records.push(record),
                FeedOutcome::Empty => stats.feeds_empty += 1,
                FeedOutcome::Failed => stats.feeds_failed += 1,
            }
        }

        sort_newest_first(&mut records);
        stats.records = records.len();

        info!(
            "Produced {} records ({} feeds failed, {} empty, {} total)",
            stats.records, stats.feeds_failed, stats.feeds_empty, stats.feeds_total
        );

        AggregationRun { records, stats }
    }

    async fn process(&self, descriptor: &FeedDescriptor) -> FeedOutcome {
        let items = match self.source.fetch(descriptor).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Skipping feed '{}': {}", descriptor.name, e);
                return FeedOutcome::Failed;
            }
        };

        match normalize(descriptor, &items) {
            Some(record) => {
                debug!("Feed '{}': latest post '{}' ({})", descriptor.name, record.title, record.date);
                FeedOutcome::Record(record)
            }
            None => {
                warn!("Feed '{}' has no entries", descriptor.name);
                FeedOutcome::Empty
            }
        }
    }
}

/// Stable sort by date descending.
pub fn sort_newest_first(records: &mut [OutputRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// One full run: read the feed list, aggregate, replace the output artifact.
///
/// Only the feed list and the artifact write can fail the run.
pub async fn aggregate_to_file(feeds_path: &Path, output_path: &Path, config: FetchConfig) -> Result<RunStats> {
    let descriptors = load_descriptors(feeds_path).await?;
    let pipeline = AggregationPipeline::from_config(config)?;

    let run = pipeline.run(&descriptors).await;
    write_dataset(output_path, &run.records).await?;

    info!("Wrote {} records to {}", run.stats.records, output_path.display());
    Ok(run.stats)
}
