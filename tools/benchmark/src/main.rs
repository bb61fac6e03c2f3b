//! Benchmark driver: replays generated workloads through a fresh engine
//! per run and prints throughput and latency percentiles.

use benchmark::export::{write_to_file, BenchExport};
use benchmark::generator::{GeneratedOp, GeneratorConfig, OrderGenerator};
use benchmark::metrics::{BenchReport, LatencyRecorder};
use matching_engine::MatchingEngine;
use std::time::Instant;

fn run_workload(label: &str, ops: &[GeneratedOp]) -> BenchReport {
    let mut engine = MatchingEngine::new();
    let mut recorder = LatencyRecorder::with_capacity(ops.len());

    let total_start = Instant::now();
    for op in ops {
        let start = Instant::now();
        match *op {
            GeneratedOp::Order {
                side,
                kind,
                price,
                quantity,
            } => {
                engine.process_order(side, kind, price, quantity);
            }
            GeneratedOp::Cancel { id } => {
                engine.cancel_order(id);
            }
        }
        recorder.record(start.elapsed().as_nanos() as u64);
    }
    let elapsed = total_start.elapsed().as_secs_f64();

    recorder.report(label, elapsed, engine.trade_count())
}

fn print_report(report: &BenchReport) {
    println!("\n=== {} ===", report.label);
    println!("Orders:     {}", report.orders);
    println!("Trades:     {}", report.trades);
    println!("Throughput: {:.0} orders/sec", report.throughput);
    println!("Latency (ns):");
    println!("  mean:  {:.1}", report.mean_ns);
    println!("  p50:   {:.1}", report.p50_ns);
    println!("  p95:   {:.1}", report.p95_ns);
    println!("  p99:   {:.1}", report.p99_ns);
    println!("  p99.9: {:.1}", report.p999_ns);
}

fn main() {
    let mut order_count: usize = 1_000_000;
    let mut json_path: Option<String> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--orders" if i + 1 < args.len() => {
                order_count = args[i + 1].parse().expect("--orders takes a number");
                i += 2;
            }
            "--json" if i + 1 < args.len() => {
                json_path = Some(args[i + 1].clone());
                i += 2;
            }
            other => {
                eprintln!("unknown argument '{}'", other);
                std::process::exit(2);
            }
        }
    }

    println!("Generating {} random orders...", order_count);
    let mut generator = OrderGenerator::new(42);

    let workloads = [
        (
            "Mixed Workload (5% cancel, 10% market)",
            GeneratorConfig {
                cancel_pct: 5,
                market_pct: 10,
                ..GeneratorConfig::default()
            },
        ),
        (
            "Pure Limit Orders",
            GeneratorConfig {
                cancel_pct: 0,
                market_pct: 0,
                ..GeneratorConfig::default()
            },
        ),
        (
            "High Cancel Rate (30%)",
            GeneratorConfig {
                cancel_pct: 30,
                market_pct: 5,
                ..GeneratorConfig::default()
            },
        ),
    ];

    let mut reports = Vec::with_capacity(workloads.len());
    for &(label, config) in &workloads {
        let ops = generator.generate(order_count, &config);
        let report = run_workload(label, &ops);
        print_report(&report);
        reports.push(report);
    }

    if let Some(path) = json_path {
        let export = BenchExport {
            order_count,
            reports,
        };
        if let Err(err) = write_to_file(&export, &path) {
            eprintln!("failed to write '{}': {}", path, err);
            std::process::exit(1);
        }
        println!("\nReports written to {}", path);
    }
}
