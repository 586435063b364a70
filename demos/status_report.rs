//! Status report over a record file.
//!
//! Usage:
//!   cargo run --example status_report -- [RECORDS] [CONFIG.json]
//!
//! Without arguments the built-in sample records are used. Set `RUST_LOG=debug`
//! to see one event per stage.

use anyhow::Result;
use linebeam::testing::SAMPLE_RECORDS;
use linebeam::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let text = match args.next() {
        Some(path) => read_snapshot(path)?,
        None => SAMPLE_RECORDS.to_string(),
    };
    let config = match args.next() {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };

    let metrics = MetricsCollector::new();
    let pipeline = StatusPipeline::new(config)?.with_metrics(metrics.clone());

    let status = pipeline.evaluate(&text)?;
    println!("{status}");

    let lines = metrics.counter("read_lines.out").unwrap_or(0);
    let tokens = metrics.counter("tokenize.out").unwrap_or(0);
    let selected = metrics.counter("select_keys.out").unwrap_or(0);
    println!(
        "{lines} lines, {} malformed, {} not selected",
        lines.saturating_sub(tokens),
        tokens.saturating_sub(selected)
    );
    println!("{}", serde_json::to_string_pretty(&metrics.to_json())?);
    Ok(())
}
