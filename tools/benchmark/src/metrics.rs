//! Latency and throughput metrics
//!
//! Per-operation latency samples with percentile extraction, aggregated
//! into a serializable report per workload.

use serde::{Deserialize, Serialize};

/// Aggregated results for one benchmark workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub label: String,
    pub orders: usize,
    pub trades: u64,
    /// Operations per second over the whole run.
    pub throughput: f64,
    pub mean_ns: f64,
    pub p50_ns: f64,
    pub p95_ns: f64,
    pub p99_ns: f64,
    pub p999_ns: f64,
}

/// Collects per-operation latencies for one run.
pub struct LatencyRecorder {
    samples: Vec<u64>,
}

impl LatencyRecorder {
    /// Create a recorder sized for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Record one operation's latency in nanoseconds.
    pub fn record(&mut self, latency_ns: u64) {
        self.samples.push(latency_ns);
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Build the report. Consumes the recorder since it sorts samples.
    pub fn report(mut self, label: &str, elapsed_secs: f64, trades: u64) -> BenchReport {
        self.samples.sort_unstable();
        let n = self.samples.len();
        assert!(n > 0, "report requires at least one sample");

        let sum: u64 = self.samples.iter().sum();
        let percentile = |per_mille: usize| -> f64 {
            let index = (n * per_mille / 1000).min(n - 1);
            self.samples[index] as f64
        };

        BenchReport {
            label: label.to_string(),
            orders: n,
            trades,
            throughput: if elapsed_secs > 0.0 { n as f64 / elapsed_secs } else { 0.0 },
            mean_ns: sum as f64 / n as f64,
            p50_ns: percentile(500),
            p95_ns: percentile(950),
            p99_ns: percentile(990),
            p999_ns: percentile(999),
        }
    }
}
