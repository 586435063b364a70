use linebeam::stages::aggregate::{lossy_value, parse_value, sort_entries};
use linebeam::testing::{corrupted_entries, entries};
use linebeam::*;

#[test]
fn sums_valid_entries() {
    let es = entries(&[("ELEMENT01", "3"), ("ELEMENT04", "4"), ("ELEMENT03", "1")]);
    assert_eq!(aggregate(es), Ok(8));
}

#[test]
fn no_entries_sum_to_zero() {
    assert_eq!(aggregate(Vec::new()), Ok(0));
}

#[test]
fn sorts_by_key_ordinally_and_stably() {
    let es = entries(&[("ELEMENT02", "a"), ("ELEMENT10", "b"), ("ELEMENT01", "c"), ("ELEMENT02", "d")]);
    let sorted: Vec<_> = sort_entries(es)
        .into_iter()
        .map(|e| e.value().to_string())
        .collect();
    assert_eq!(sorted, vec!["c", "a", "d", "b"]);
}

#[test]
fn invalid_value_short_circuits() {
    let failure = aggregate(corrupted_entries()).unwrap_err();
    assert_eq!(failure.key, "ELEMENT06");
    assert_eq!(failure.value, "not an integer");
    assert!(matches!(failure.reason, FailureReason::InvalidValue(_)));
    // ELEMENT07 sorts after ELEMENT06
    assert_eq!(failure.skipped, 1);
}

#[test]
fn failure_is_reported_at_the_first_bad_key_in_sort_order() {
    let es = entries(&[("ELEMENT09", "x"), ("ELEMENT01", "1"), ("ELEMENT05", "y"), ("ELEMENT02", "2")]);
    let failure = aggregate(es).unwrap_err();
    assert_eq!(failure.key, "ELEMENT05");
    assert_eq!(failure.skipped, 1);
}

#[test]
fn failure_is_not_zero() {
    let es = entries(&[("ELEMENT01", "0"), ("ELEMENT02", "zero")]);
    let agg = aggregate(es);
    assert!(agg.is_err());
    assert_ne!(agg, Ok(0));
}

#[test]
fn negative_and_padded_values_fail() {
    assert!(aggregate(entries(&[("ELEMENT01", "-3")])).is_err());
    assert!(aggregate(entries(&[("ELEMENT01", " 3")])).is_err());
    assert!(aggregate(entries(&[("ELEMENT01", "")])).is_err());
}

#[test]
fn overflow_is_a_failure() {
    let max = u64::MAX.to_string();
    let failure = aggregate(entries(&[("ELEMENT01", max.as_str()), ("ELEMENT02", "1")])).unwrap_err();
    assert_eq!(failure.reason, FailureReason::Overflow);
    assert_eq!(failure.key, "ELEMENT02");
    assert_eq!(failure.skipped, 0);
}

#[test]
fn parse_value_accepts_plain_integers() {
    assert_eq!(parse_value("12"), Ok(12));
    assert!(parse_value("1.5").is_err());
}

#[test]
fn failure_message_names_the_entry() {
    let failure = aggregate(corrupted_entries()).unwrap_err();
    let msg = failure.to_string();
    assert!(msg.contains("ELEMENT06"), "{msg}");
    assert!(msg.contains("1 later entries"), "{msg}");
}

#[test]
fn lossy_sum_poisons_the_total() {
    assert!(aggregate_lossy(corrupted_entries()).is_nan());
    assert_eq!(aggregate_lossy(entries(&[("ELEMENT01", "3"), ("ELEMENT02", "-1")])), 2.0);
    assert!(lossy_value("nope").is_nan());
}

#[test]
fn checked_sum_runs_as_a_pipeline_stage() -> anyhow::Result<()> {
    let p = Pipeline::default();
    let agg = from_vec(&p, corrupted_entries())
        .sort_by_key(|e: &Entry| e.key().to_owned())
        .combine_globally(CheckedSum)
        .collect_single()?;
    assert_eq!(agg, aggregate(corrupted_entries()));
    Ok(())
}
