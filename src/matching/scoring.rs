use crate::db::models::{CallRecord, Recording};
use crate::matching::config::MatchOptions;

// Factor weights. Time and phone dominate because the CSV export's clock and
// caller id are the two signals an operator trusts most; duration is a
// secondary corroborator.
const WEIGHT_TIME: f64 = 0.4;
const WEIGHT_PHONE: f64 = 0.4;
const WEIGHT_DURATION: f64 = 0.2;

/// Compute a similarity score in [0, 1] for one (recording, call record) pair.
///
/// Weighted average over the factors that are actually present, re-normalized
/// by their combined weight so a candidate missing optional data is judged
/// only on what is known.
pub fn compute_match_score(
    recording: &Recording,
    record: &CallRecord,
    options: &MatchOptions,
) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    // Time factor: always present.
    let time_gap = time_diff_minutes(recording, record).abs();
    weighted_sum += WEIGHT_TIME * score_time(time_gap, options.time_tolerance_minutes);
    weight_total += WEIGHT_TIME;

    // Phone factor: present only when enabled and both sides have a number to compare.
    if options.phone_number_match {
        if let Some(number) = recording.phone_number.as_deref() {
            if record.source_number.is_some() || record.destination_number.is_some() {
                let matched = phone_numbers_match(number, record);
                weighted_sum += WEIGHT_PHONE * if matched { 1.0 } else { 0.0 };
                weight_total += WEIGHT_PHONE;
            }
        }
    }

    // Duration factor: present only when both sides report a duration.
    if let Some(diff_seconds) = duration_diff_seconds(recording, record) {
        weighted_sum +=
            WEIGHT_DURATION * score_duration(diff_seconds, options.duration_tolerance_seconds);
        weight_total += WEIGHT_DURATION;
    }

    if weight_total == 0.0 {
        return 0.0;
    }

    weighted_sum / weight_total
}

/// Signed gap in fractional minutes between the recording's observed time and
/// the call-detail row's call time.
pub fn time_diff_minutes(recording: &Recording, record: &CallRecord) -> f64 {
    (recording.observed_time - record.call_time).num_milliseconds() as f64 / 60_000.0
}

/// Absolute duration gap in seconds, when both sides report one.
pub fn duration_diff_seconds(recording: &Recording, record: &CallRecord) -> Option<u64> {
    match (recording.duration_seconds, record.duration_seconds) {
        (Some(ours), Some(theirs)) => Some(ours.abs_diff(theirs)),
        _ => None,
    }
}

/// Exact equality against either endpoint of the call-detail row.
pub fn phone_numbers_match(number: &str, record: &CallRecord) -> bool {
    record.source_number.as_deref() == Some(number)
        || record.destination_number.as_deref() == Some(number)
}

/// Linear decay from 1.0 at a zero gap to 0.0 at or beyond the tolerance.
fn score_time(abs_gap_minutes: f64, tolerance_minutes: f64) -> f64 {
    (1.0 - abs_gap_minutes / tolerance_minutes).max(0.0)
}

fn score_duration(gap_seconds: u64, tolerance_seconds: f64) -> f64 {
    (1.0 - gap_seconds as f64 / tolerance_seconds).max(0.0)
}
