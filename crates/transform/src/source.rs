//! Line-delimited JSON sources.
//!
//! Input arrives as trees of `*.json` files, one JSON object per line. The
//! pipelines treat "the set of matching records" as an opaque collection;
//! this module is the glue that resolves a root directory into that
//! collection. A record that fails to deserialize is a fatal schema error; a
//! missing or empty root is not an error and yields an empty collection.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use mart_core::{CatalogRecord, Error, Result, UsageEvent};
use telemetry::metrics;

/// Reads all catalog records under `root`.
pub fn read_catalog(root: &Path) -> Result<Vec<CatalogRecord>> {
    let records: Vec<CatalogRecord> = read_ndjson(root)?;
    metrics()
        .catalog_records_read
        .inc_by(records.len() as u64);
    Ok(records)
}

/// Reads all usage events under `root`.
pub fn read_events(root: &Path) -> Result<Vec<UsageEvent>> {
    let events: Vec<UsageEvent> = read_ndjson(root)?;
    metrics().events_read.inc_by(events.len() as u64);
    Ok(events)
}

/// Reads every record of type `T` from the `*.json` files under `root`.
fn read_ndjson<T: DeserializeOwned>(root: &Path) -> Result<Vec<T>> {
    if !root.exists() {
        warn!(root = %root.display(), "Input directory missing, treating as empty");
        return Ok(Vec::new());
    }

    let start = std::time::Instant::now();

    let mut files = Vec::new();
    collect_json_files(root, &mut files)?;
    // Deterministic record order regardless of directory iteration order.
    files.sort();

    let mut records = Vec::new();
    for path in &files {
        read_ndjson_file(path, &mut records)?;
    }

    metrics().source_files_read.inc_by(files.len() as u64);
    metrics()
        .source_read_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    debug!(
        root = %root.display(),
        files = files.len(),
        records = records.len(),
        "Scanned source"
    );

    Ok(records)
}

fn read_ndjson_file<T: DeserializeOwned>(path: &Path, out: &mut Vec<T>) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            Error::schema(format!("{}:{}: {}", path.display(), index + 1, e))
        })?;
        out.push(record);
    }

    Ok(())
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}
