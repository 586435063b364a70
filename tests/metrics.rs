//! Tests for the metrics module.

use linebeam::*;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn increment_and_set_counters() {
    let collector = MetricsCollector::new();
    collector.increment_counter("lines", 1);
    collector.increment_counter("lines", 5);
    assert_eq!(collector.counter("lines"), Some(6));

    collector.set_counter("lines", 2);
    assert_eq!(collector.counter("lines"), Some(2));
    assert_eq!(collector.counter("missing"), None);
}

#[test]
fn clones_share_counters() {
    let collector = MetricsCollector::new();
    let handle = collector.clone();
    handle.increment_counter("shared", 3);
    assert_eq!(collector.counter("shared"), Some(3));
}

#[test]
fn runner_records_stage_counters() -> anyhow::Result<()> {
    let p = Pipeline::default();
    let metrics = MetricsCollector::new();
    p.set_metrics(metrics.clone());

    from_vec(&p, vec![1u32, 2, 3, 4, 5])
        .filter(|x: &u32| *x > 2)
        .named("big")
        .collect_seq()?;

    assert_eq!(metrics.counter("source.out"), Some(5));
    assert_eq!(metrics.counter("big.in"), Some(5));
    assert_eq!(metrics.counter("big.out"), Some(3));
    assert!(metrics.elapsed().is_some());
    Ok(())
}

#[test]
fn begin_run_drops_earlier_counters() {
    let collector = MetricsCollector::new();
    collector.increment_counter("stale.out", 4);
    collector.begin_run();
    assert_eq!(collector.counter("stale.out"), None);
    assert!(collector.elapsed().is_none());
}

#[test]
fn rerunning_a_pipeline_reports_the_last_run() -> anyhow::Result<()> {
    let p = Pipeline::default();
    let metrics = MetricsCollector::new();
    p.set_metrics(metrics.clone());

    let big = from_vec(&p, vec![1u32, 2, 3, 4, 5])
        .filter(|x: &u32| *x > 2)
        .named("big");
    big.clone().collect_seq()?;
    big.collect_seq()?;

    assert_eq!(metrics.counter("source.out"), Some(5));
    assert_eq!(metrics.counter("big.out"), Some(3));
    Ok(())
}

#[test]
fn take_metrics_detaches_collector() -> anyhow::Result<()> {
    let p = Pipeline::default();
    p.set_metrics(MetricsCollector::new());
    let metrics = p.take_metrics().expect("collector attached");
    assert!(p.metrics().is_none());

    from_vec(&p, vec![1u8]).collect_seq()?;
    assert!(metrics.snapshot().is_empty());
    Ok(())
}

#[test]
fn json_export_and_save() -> anyhow::Result<()> {
    let collector = MetricsCollector::new();
    collector.set_counter("tokenize.out", 8);
    assert_eq!(collector.to_json(), json!({ "tokenize.out": 8 }));

    let dir = TempDir::new()?;
    let path = dir.path().join("metrics.json");
    collector.save_to_file(&path)?;
    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved["tokenize.out"], json!(8));
    Ok(())
}

#[test]
fn clear_resets_everything() {
    let collector = MetricsCollector::new();
    collector.begin_run();
    collector.record_end();
    collector.increment_counter("x", 1);
    collector.clear();
    assert!(collector.snapshot().is_empty());
    assert!(collector.elapsed().is_none());
}
