use anyhow::Context;
use clap::Parser;
use planet_aggregator::{aggregate_to_file, FetchConfig};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Collect the latest post of every configured feed into one JSON dataset.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON array of {"name", "url"} feed descriptors
    #[arg(long, env = "FEEDS_FILE", default_value = "feeds.json")]
    feeds: PathBuf,

    /// Output dataset, replaced on every run
    #[arg(long, env = "OUTPUT_FILE", default_value = "data/posts.json")]
    output: PathBuf,

    /// Maximum number of feeds fetched at once
    #[arg(long, env = "CONCURRENCY")]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT")]
    timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, env = "USER_AGENT")]
    user_agent: Option<String>,
}

impl Args {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default().with_overrides(self.concurrency, self.timeout, self.user_agent.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    info!("Starting feed aggregation: {} -> {}", args.feeds.display(), args.output.display());

    let stats = aggregate_to_file(&args.feeds, &args.output, args.fetch_config())
        .await
        .map_err(|e| {
            error!("Aggregation failed: {}", e);
            e
        })
        .context("feed aggregation run failed")?;

    info!("Aggregation finished: {} records from {} feeds", stats.records, stats.feeds_total);
    Ok(())
}
