pub mod types;
pub mod sanitize;
pub mod traits;
pub mod parser;
pub mod fetcher;
pub mod normalize;
pub mod dataset;
pub mod pipeline;

pub use types::*;
pub use traits::FeedSource;
pub use parser::FeedParser;
pub use fetcher::Fetcher;
pub use sanitize::{sanitize, truncate_snippet};
pub use normalize::normalize;
pub use dataset::{load_descriptors, read_dataset, write_dataset};
pub use pipeline::{aggregate_to_file, AggregationPipeline, AggregationRun, RunStats};
