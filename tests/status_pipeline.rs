use linebeam::testing::*;
use linebeam::*;

#[test]
fn sample_records_report_running() -> anyhow::Result<()> {
    let status = StatusPipeline::default().evaluate(SAMPLE_RECORDS)?;
    assert_eq!(status.to_string(), SAMPLE_STATUS);
    assert_eq!(status_of(SAMPLE_RECORDS)?, "[44%] Running...");
    Ok(())
}

#[test]
fn sample_aggregate_is_44() -> anyhow::Result<()> {
    assert_eq!(StatusPipeline::default().aggregate(SAMPLE_RECORDS)?, Ok(44));
    Ok(())
}

#[test]
fn lowercase_element_key_is_kept_and_normalized() -> anyhow::Result<()> {
    let entries = StatusPipeline::default().selected_entries(SAMPLE_RECORDS)?;
    let keys: Vec<&str> = entries.iter().map(Entry::key).collect();
    assert_eq!(
        keys,
        vec!["ELEMENT01", "ELEMENT02", "ELEMENT03", "ELEMENT04", "ELEMENT06", "ELEMENT07"]
    );
    Ok(())
}

#[test]
fn filter_first_order_drops_lowercase_key() -> anyhow::Result<()> {
    let config = PipelineConfig::default().with_key_order(KeyOrder::FilterThenNormalize);
    let pipeline = StatusPipeline::new(config)?;
    assert_eq!(pipeline.aggregate(SAMPLE_RECORDS)?, Ok(32));
    assert_eq!(pipeline.evaluate(SAMPLE_RECORDS)?.to_string(), "[32%] Running...");
    Ok(())
}

#[test]
fn bad_value_makes_status_unavailable() -> anyhow::Result<()> {
    let status = StatusPipeline::default().evaluate(&corrupted_records())?;
    assert_eq!(status, StatusMessage::Unavailable);
    assert_eq!(status.to_string(), "No value available");
    Ok(())
}

#[test]
fn silent_corruption_reports_done() -> anyhow::Result<()> {
    let config = PipelineConfig::default().with_propagation(Propagation::SilentCorruption);
    let pipeline = StatusPipeline::new(config)?;
    assert!(pipeline.lossy_total(&corrupted_records())?.is_nan());
    assert_eq!(pipeline.evaluate(&corrupted_records())?.to_string(), "Done");
    Ok(())
}

#[test]
fn silent_corruption_agrees_on_clean_input() -> anyhow::Result<()> {
    let lossy = StatusPipeline::new(
        PipelineConfig::default().with_propagation(Propagation::SilentCorruption),
    )?;
    assert_eq!(lossy.evaluate(SAMPLE_RECORDS)?.to_string(), SAMPLE_STATUS);
    Ok(())
}

#[test]
fn empty_input_starts_at_zero() -> anyhow::Result<()> {
    assert_eq!(status_of("")?, "[0%] Started...");
    assert_eq!(status_of("no records here\nfoo=1")?, "[0%] Started...");
    Ok(())
}

#[test]
fn totals_of_a_hundred_or_more_are_done() -> anyhow::Result<()> {
    assert_eq!(status_of("ELEMENT01=60\nELEMENT02=40")?, "Done");
    assert_eq!(status_of("ELEMENT01=99")?, "[99%] Almost done...");
    Ok(())
}

#[test]
fn value_containing_delimiter_fails_to_parse() -> anyhow::Result<()> {
    let agg = StatusPipeline::default().aggregate("ELEMENT01=3=4")?;
    let failure = agg.unwrap_err();
    assert_eq!(failure.value, "3=4");
    Ok(())
}

#[test]
fn custom_delimiter_and_target() -> anyhow::Result<()> {
    let config = PipelineConfig::default().with_delimiter(':').with_target("step");
    let pipeline = StatusPipeline::new(config)?;
    let text = "STEP_A:10\nstep_b:70\nother:5\nSTEP_C=1";
    assert_eq!(pipeline.evaluate(text)?.to_string(), "[80%] Almost done...");
    Ok(())
}

#[test]
fn invalid_config_is_rejected() {
    let err = StatusPipeline::new(PipelineConfig::default().with_target("")).err();
    assert_eq!(err, Some(ConfigError::EmptyTarget));
}

#[test]
fn evaluation_is_repeatable() -> anyhow::Result<()> {
    let pipeline = StatusPipeline::default();
    let first = pipeline.evaluate(SAMPLE_RECORDS)?;
    let second = pipeline.evaluate(SAMPLE_RECORDS)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn metrics_count_dropped_records() -> anyhow::Result<()> {
    let metrics = MetricsCollector::new();
    let pipeline = StatusPipeline::default().with_metrics(metrics.clone());
    pipeline.evaluate(SAMPLE_RECORDS)?;

    assert_eq!(metrics.counter("read_lines.out"), Some(11));
    assert_eq!(metrics.counter("tokenize.in"), Some(11));
    // two blank lines and `discarded:incorrect`
    assert_eq!(metrics.counter("tokenize.out"), Some(8));
    // foo and bar
    assert_eq!(metrics.counter("select_keys.out"), Some(6));
    assert_eq!(metrics.counter("checked_sum.in"), Some(6));
    assert_eq!(metrics.counter("checked_sum.out"), Some(1));
    assert_eq!(metrics.counter("format_status.out"), Some(1));
    assert!(metrics.elapsed().is_some());
    Ok(())
}

#[test]
fn reused_pipeline_reports_metrics_for_the_latest_run() -> anyhow::Result<()> {
    let metrics = MetricsCollector::new();
    let pipeline = StatusPipeline::default().with_metrics(metrics.clone());
    pipeline.evaluate(SAMPLE_RECORDS)?;
    pipeline.evaluate(SAMPLE_RECORDS)?;

    assert_eq!(metrics.counter("read_lines.out"), Some(11));
    assert_eq!(metrics.counter("tokenize.out"), Some(8));
    assert_eq!(metrics.counter("select_keys.out"), Some(6));
    Ok(())
}

#[test]
fn selected_entries_contain_the_target_in_uppercase() -> anyhow::Result<()> {
    let entries = StatusPipeline::default().selected_entries(SAMPLE_RECORDS)?;
    assert_all(&entries, |e: &Entry| e.key().contains(linebeam::config::DEFAULT_TARGET));
    assert_none(&entries, |e: &Entry| e.key().chars().any(char::is_lowercase));
    assert_none(&entries, |e: &Entry| matches!(e.key(), "FOO" | "BAR"));
    Ok(())
}

#[test]
fn pipeline_keeps_its_validated_config() -> anyhow::Result<()> {
    let config = PipelineConfig::default()
        .with_delimiter(':')
        .with_propagation(Propagation::SilentCorruption);
    let pipeline = StatusPipeline::new(config.clone())?;
    assert_eq!(pipeline.config(), &config);
    assert_eq!(StatusPipeline::default().config(), &PipelineConfig::default());
    Ok(())
}
