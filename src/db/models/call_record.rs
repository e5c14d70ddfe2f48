//! Call-detail record data model.
//!
//! One row of the phone system's CSV export, validated and typed at the
//! import boundary. Read-only to the matching engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Inbound,
    Outbound,
}

impl CallDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallDirection::Inbound => "inbound",
            CallDirection::Outbound => "outbound",
        }
    }
}

/// One imported call-detail row considered as a possible match for a
/// recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub id: String,
    pub user_id: String,
    pub call_time: DateTime<Utc>,
    pub direction: CallDirection,
    pub source_number: Option<String>,
    pub destination_number: Option<String>,
    pub duration_seconds: Option<u64>,
    pub disposition: Option<String>,
    pub time_to_answer_seconds: Option<i64>,
    pub imported_at: DateTime<Utc>,
}
