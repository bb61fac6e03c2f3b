//! Benchmark harness for the matching engine
//!
//! Deterministic random workloads driven straight into the engine with
//! per-operation latency capture.
//!
//! # Modules
//! - `generator` — seeded random order/cancel stream
//! - `metrics` — latency percentiles and throughput
//! - `export` — JSON export of workload reports

pub mod export;
pub mod generator;
pub mod metrics;

pub use export::BenchExport;
pub use generator::{GeneratedOp, GeneratorConfig, OrderGenerator};
pub use metrics::{BenchReport, LatencyRecorder};
