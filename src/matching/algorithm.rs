use serde::{Deserialize, Serialize};

use crate::db::models::{CallRecord, Recording};
use crate::matching::{
    config::MatchOptions,
    ranking::rank_matches,
    reasons::build_match_reasons,
    scoring::{compute_match_score, duration_diff_seconds, phone_numbers_match, time_diff_minutes},
};

/// Matches ranked below this score are not offered for automatic linking.
pub const DEFAULT_MIN_SCORE: f64 = 0.7;

/// Pools at least this large are scored on worker threads; smaller pools are
/// cheaper to score inline than to fan out.
const PARALLEL_POOL_THRESHOLD: usize = 256;

/// One candidate row together with the evidence computed against a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    pub record: CallRecord,
    pub score: f64,
    pub time_diff_minutes: f64,
    pub duration_diff_seconds: Option<u64>,
    pub match_reasons: Vec<String>,
}

/// Score every candidate in the pool against the recording and return the
/// full ranked set. An empty pool yields an empty set, not an error.
pub fn find_and_rank(
    recording: &Recording,
    candidates: &[CallRecord],
    options: &MatchOptions,
) -> Vec<ScoredMatch> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let scored = if candidates.len() >= PARALLEL_POOL_THRESHOLD {
        score_pool_parallel(recording, candidates, options)
    } else {
        candidates
            .iter()
            .map(|record| score_candidate(recording, record, options))
            .collect()
    };

    rank_matches(scored)
}

/// The first-ranked match, when it clears the score floor. Callers wanting a
/// single automatic decision use this; callers building a review list use the
/// full ranked output.
pub fn best_match(ranked: &[ScoredMatch], min_score: f64) -> Option<&ScoredMatch> {
    ranked.first().filter(|scored| scored.score >= min_score)
}

fn score_candidate(
    recording: &Recording,
    record: &CallRecord,
    options: &MatchOptions,
) -> ScoredMatch {
    let score = compute_match_score(recording, record, options);
    let time_diff = time_diff_minutes(recording, record);
    let duration_diff = duration_diff_seconds(recording, record);

    // The reason tag reports any phone agreement regardless of whether the
    // scorer was configured to weigh it.
    let phone_matched = recording
        .phone_number
        .as_deref()
        .map(|number| phone_numbers_match(number, record))
        .unwrap_or(false);

    ScoredMatch {
        record: record.clone(),
        score,
        time_diff_minutes: time_diff,
        duration_diff_seconds: duration_diff,
        match_reasons: build_match_reasons(time_diff, duration_diff, phone_matched),
    }
}

/// Chunked scoring across scoped threads. Per-candidate scoring is
/// independent; the final rank restores a deterministic order.
fn score_pool_parallel(
    recording: &Recording,
    candidates: &[CallRecord],
    options: &MatchOptions,
) -> Vec<ScoredMatch> {
    let workers = std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1);
    let chunk_size = candidates.len().div_ceil(workers).max(1);

    std::thread::scope(|scope| {
        let handles: Vec<_> = candidates
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|record| score_candidate(recording, record, options))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_default())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::CallDirection;
    use crate::matching::quality::classify_match;
    use chrono::{DateTime, Duration, Utc};

    fn base_time() -> DateTime<Utc> {
        "2024-01-01T10:00:00Z".parse().unwrap()
    }

    fn recording() -> Recording {
        Recording {
            id: "rec-1".into(),
            user_id: "user-1".into(),
            observed_time: base_time(),
            phone_number: Some("555-1111".into()),
            duration_seconds: Some(120),
            file_name: Some("call.wav".into()),
            created_at: base_time(),
        }
    }

    fn candidate(
        id: &str,
        offset_secs: i64,
        source: Option<&str>,
        duration: Option<u64>,
    ) -> CallRecord {
        CallRecord {
            id: id.into(),
            user_id: "user-1".into(),
            call_time: base_time() + Duration::seconds(offset_secs),
            direction: CallDirection::Inbound,
            source_number: source.map(str::to_string),
            destination_number: None,
            duration_seconds: duration,
            disposition: None,
            time_to_answer_seconds: None,
            imported_at: base_time(),
        }
    }

    #[test]
    fn ranks_the_corroborated_candidate_first() {
        // A: thirty seconds out, same number, five seconds of duration drift.
        // B: ten minutes out, different number, identical duration.
        let pool = vec![
            candidate("b", 600, Some("555-2222"), Some(120)),
            candidate("a", 30, Some("555-1111"), Some(125)),
        ];

        let ranked = find_and_rank(&recording(), &pool, &MatchOptions::default());

        assert_eq!(ranked[0].record.id, "a");
        assert!(ranked[0].score >= 0.9);
        assert_eq!(
            ranked[0].match_reasons,
            vec!["Exact time match", "Very close duration", "Phone number match"]
        );

        assert_eq!(ranked[1].record.id, "b");
        assert!((ranked[1].score - 0.2).abs() < 1e-9);
        assert!(ranked[1].match_reasons.is_empty());
    }

    #[test]
    fn empty_pool_yields_empty_results() {
        let ranked = find_and_rank(&recording(), &[], &MatchOptions::default());
        assert!(ranked.is_empty());
        assert!(best_match(&ranked, DEFAULT_MIN_SCORE).is_none());
    }

    #[test]
    fn best_match_respects_the_score_floor() {
        let pool = vec![candidate("far", 150, None, None)];
        let ranked = find_and_rank(&recording(), &pool, &MatchOptions::default());

        // Time factor alone at a 2.5 minute gap: 0.5.
        assert!(best_match(&ranked, DEFAULT_MIN_SCORE).is_none());
        assert!(best_match(&ranked, 0.5).is_some());
    }

    #[test]
    fn pool_order_does_not_change_the_verdict() {
        let forward = vec![
            candidate("a", 30, Some("555-1111"), Some(125)),
            candidate("b", 600, Some("555-2222"), Some(120)),
            candidate("c", 90, Some("555-1111"), Some(120)),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let options = MatchOptions::default();
        let ranked_forward = find_and_rank(&recording(), &forward, &options);
        let ranked_reversed = find_and_rank(&recording(), &reversed, &options);

        let top_forward = best_match(&ranked_forward, DEFAULT_MIN_SCORE).unwrap();
        let top_reversed = best_match(&ranked_reversed, DEFAULT_MIN_SCORE).unwrap();

        assert_eq!(top_forward.record.id, top_reversed.record.id);
        assert_eq!(classify_match(top_forward), classify_match(top_reversed));
    }

    #[test]
    fn large_pools_score_identically_to_small_ones() {
        // Push the pool over the worker-thread threshold and check the
        // winner still comes out on top with the expected score.
        let mut pool: Vec<CallRecord> = (0..400)
            .map(|i| {
                candidate(
                    &format!("filler-{i}"),
                    600 + i,
                    Some("555-9999"),
                    Some(300),
                )
            })
            .collect();
        pool.push(candidate("winner", 30, Some("555-1111"), Some(125)));

        let options = MatchOptions::default();
        let ranked = find_and_rank(&recording(), &pool, &options);

        assert_eq!(ranked.len(), 401);
        assert_eq!(ranked[0].record.id, "winner");

        let expected = compute_match_score(
            &recording(),
            &candidate("winner", 30, Some("555-1111"), Some(125)),
            &options,
        );
        assert!((ranked[0].score - expected).abs() < f64::EPSILON);
    }
}
