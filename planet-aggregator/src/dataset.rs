use crate::types::{AggregatorError, FeedDescriptor, OutputRecord, Result};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Read the feed list, a JSON array of `{"name", "url"}` objects.
pub async fn load_descriptors(path: &Path) -> Result<Vec<FeedDescriptor>> {
    let wrap = |source: AggregatorError| AggregatorError::FeedList {
        path: path.to_path_buf(),
        source: Box::new(source),
    };

    let raw = fs::read(path).await.map_err(|e| wrap(e.into()))?;
    let descriptors: Vec<FeedDescriptor> = serde_json::from_slice(&raw).map_err(|e| wrap(e.into()))?;

    let mut seen = HashSet::new();
    for descriptor in &descriptors {
        if !seen.insert(descriptor.name.as_str()) {
            warn!("Feed name '{}' appears more than once in {}", descriptor.name, path.display());
        }
    }

    debug!("Loaded {} feed descriptors from {}", descriptors.len(), path.display());
    Ok(descriptors)
}

/// Replace the artifact at `path` with `records` as pretty-printed JSON.
///
/// The content goes to a sibling temp file, is synced to disk, and is then
/// renamed over the target, so readers see either the old dataset or the new one.
pub async fn write_dataset(path: &Path, records: &[OutputRecord]) -> Result<()> {
    let wrap = |source: std::io::Error| AggregatorError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(wrap)?;
    }

    let temp = temp_path(path);
    if let Err(e) = write_synced(&temp, json.as_bytes()).await {
        let _ = fs::remove_file(&temp).await;
        return Err(wrap(e));
    }
    if let Err(e) = fs::rename(&temp, path).await {
        let _ = fs::remove_file(&temp).await;
        return Err(wrap(e));
    }

    debug!("Wrote {} records ({} bytes) to {}", records.len(), json.len(), path.display());
    Ok(())
}

/// Read an artifact written by [`write_dataset`].
pub async fn read_dataset(path: &Path) -> Result<Vec<OutputRecord>> {
    let raw = fs::read(path).await?;
    Ok(serde_json::from_slice(&raw)?)
}

async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

/// Per-process, per-call temp name so overlapping writers never share a file.
fn temp_path(path: &Path) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| OsStr::new("dataset")));
    name.push(format!(".{}.{}.tmp", std::process::id(), COUNTER.fetch_add(1, Ordering::Relaxed)));
    path.with_file_name(name)
}
