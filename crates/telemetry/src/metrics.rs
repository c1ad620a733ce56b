//! In-process metrics for one mart-builder run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Histogram for latency tracking.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 5s, 10s
    buckets: [AtomicU64; 11],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 11] = [1, 5, 10, 25, 50, 100, 250, 500, 1000, 5000, 10000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        for (i, &bound) in Self::BUCKET_BOUNDS.iter().enumerate() {
            if ms <= bound {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
                return;
            }
        }
        // Value exceeds all buckets, add to last
        self.buckets[10].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }
}

/// Collected metrics for one run of the mart builder.
#[derive(Debug, Default)]
pub struct Metrics {
    // Source metrics
    pub catalog_records_read: Counter,
    pub events_read: Counter,
    pub source_files_read: Counter,

    // Transform metrics
    pub events_admitted: Counter,
    pub facts_assembled: Counter,
    pub facts_unmatched: Counter,

    // Store metrics
    pub relations_written: Counter,
    pub rows_written: Counter,
    pub files_written: Counter,

    // Latency histograms
    pub source_read_latency_ms: Histogram,
    pub write_latency_ms: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub catalog_records_read: u64,
    pub events_read: u64,
    pub source_files_read: u64,
    pub events_admitted: u64,
    pub facts_assembled: u64,
    pub facts_unmatched: u64,
    pub relations_written: u64,
    pub rows_written: u64,
    pub files_written: u64,
    pub source_read_latency_mean_ms: f64,
    pub write_latency_mean_ms: f64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            catalog_records_read: self.catalog_records_read.get(),
            events_read: self.events_read.get(),
            source_files_read: self.source_files_read.get(),
            events_admitted: self.events_admitted.get(),
            facts_assembled: self.facts_assembled.get(),
            facts_unmatched: self.facts_unmatched.get(),
            relations_written: self.relations_written.get(),
            rows_written: self.rows_written.get(),
            files_written: self.files_written.get(),
            source_read_latency_mean_ms: self.source_read_latency_ms.mean(),
            write_latency_mean_ms: self.write_latency_ms.mean(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
