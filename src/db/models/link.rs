use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confirmed association between a recording and the call-detail row it was
/// matched to. A recording carries at most one active link; re-linking
/// replaces the prior row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub recording_id: String,
    pub call_record_id: String,
    pub linked_at: DateTime<Utc>,
}
