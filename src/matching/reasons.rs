/// Derive the human-readable justification tags for one scored pair.
///
/// Tags are appended time first, then duration, then phone, because reviewers
/// scan the list top-to-bottom expecting temporal evidence first.
pub fn build_match_reasons(
    time_diff_minutes: f64,
    duration_diff_seconds: Option<u64>,
    phone_matched: bool,
) -> Vec<String> {
    let mut reasons = Vec::new();

    let time_gap = time_diff_minutes.abs();
    if time_gap < 1.0 {
        reasons.push("Exact time match".to_string());
    } else if time_gap < 2.0 {
        reasons.push("Close time match".to_string());
    }

    if let Some(gap) = duration_diff_seconds {
        if gap == 0 {
            reasons.push("Exact duration match".to_string());
        } else if gap <= 5 {
            reasons.push("Very close duration".to_string());
        } else if gap <= 30 {
            reasons.push("Similar duration".to_string());
        }
    }

    if phone_matched {
        reasons.push("Phone number match".to_string());
    }

    reasons
}
