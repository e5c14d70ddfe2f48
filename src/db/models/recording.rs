//! Recording data model.
//!
//! Represents the observed call metadata of one uploaded audio file before
//! matching. The audio bytes themselves live in external storage; only the
//! attributes the matching engine needs are kept here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: String,
    pub user_id: String,
    pub observed_time: DateTime<Utc>,
    pub phone_number: Option<String>,
    pub duration_seconds: Option<u64>,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
