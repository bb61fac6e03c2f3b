//! Benchmark result export
//!
//! Serializes the collected workload reports to JSON for external
//! tooling and run-over-run comparison.

use crate::metrics::BenchReport;
use serde::{Deserialize, Serialize};

/// Complete output of one benchmark invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchExport {
    pub order_count: usize,
    pub reports: Vec<BenchReport>,
}

/// Render an export as pretty-printed JSON.
pub fn export_json(export: &BenchExport) -> String {
    serde_json::to_string_pretty(export).unwrap_or_default()
}

/// Write an export to a file path.
pub fn write_to_file(export: &BenchExport, path: &str) -> std::io::Result<()> {
    std::fs::write(path, export_json(export))
}
