use serde::{Deserialize, Serialize};

/// Configuration for one matching request with tunable tolerances.
///
/// Callers construct (or load) a value and pass it explicitly into every
/// matching call; there is no shared default instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    /// Candidate window half-width; the time factor decays to zero at this gap
    pub time_tolerance_minutes: f64,

    /// Weigh the recording's number against candidate source/destination numbers
    pub phone_number_match: bool,

    /// Duration gap at which the duration factor decays to zero
    pub duration_tolerance_seconds: f64,

    /// Accepted for exports that carry a disposition column; scoring does not
    /// weigh dispositions yet
    pub require_disposition_match: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            time_tolerance_minutes: 5.0,
            phone_number_match: true,
            duration_tolerance_seconds: 30.0,
            require_disposition_match: false,
        }
    }
}
