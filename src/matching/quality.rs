use serde::{Deserialize, Serialize};

use crate::matching::algorithm::ScoredMatch;

/// Layered confidence tiers for a chosen match. High implies medium; the
/// tiers gate automatic linking versus human review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuality {
    pub is_high_quality: bool,
    pub is_medium_quality: bool,
    pub is_low_quality: bool,
    pub reasons: Vec<String>,
}

/// Classify a chosen match into confidence tiers.
///
/// Both upper tiers start true and are degraded check by check; every
/// downgrade out of the high tier records a reason for reviewers.
pub fn classify_match(scored: &ScoredMatch) -> MatchQuality {
    let mut is_high_quality = true;
    let mut is_medium_quality = true;
    let mut reasons = Vec::new();

    let time_gap = scored.time_diff_minutes.abs();
    if time_gap > 2.0 {
        reasons.push("Time difference is significant".to_string());
        is_high_quality = false;
    } else if time_gap > 5.0 {
        // Note: unreachable behind the > 2.0 guard above. Kept as-is until
        // the medium-tier time threshold is settled with the review team.
        is_medium_quality = false;
    }

    if scored.score < 0.9 {
        reasons.push("Match score is below 90%".to_string());
        is_high_quality = false;
    } else if scored.score < 0.7 {
        // Same shadowed shape as the time check above.
        is_medium_quality = false;
    }

    if scored.record.source_number.is_none() && scored.record.destination_number.is_none() {
        reasons.push("No phone number data available".to_string());
        is_high_quality = false;
    }

    MatchQuality {
        is_high_quality,
        is_medium_quality,
        is_low_quality: !is_medium_quality,
        reasons,
    }
}
