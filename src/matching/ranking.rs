use std::cmp::Ordering;

use crate::matching::algorithm::ScoredMatch;

/// Scores closer than this are treated as tied so floating-point noise cannot
/// reorder equally-plausible candidates.
const SCORE_EPSILON: f64 = 0.01;

/// Order scored matches for review: score descending, with near-ties broken
/// by temporal closeness. Stable, and never truncates the set.
pub fn rank_matches(mut matches: Vec<ScoredMatch>) -> Vec<ScoredMatch> {
    matches.sort_by(compare_matches);
    matches
}

fn compare_matches(a: &ScoredMatch, b: &ScoredMatch) -> Ordering {
    if (a.score - b.score).abs() > SCORE_EPSILON {
        b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
    } else {
        a.time_diff_minutes
            .abs()
            .partial_cmp(&b.time_diff_minutes.abs())
            .unwrap_or(Ordering::Equal)
    }
}
