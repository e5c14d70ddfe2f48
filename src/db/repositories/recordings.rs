use anyhow::{Context, Result};
use rusqlite::params;

use crate::db::{
    helpers::{optional_duration, parse_datetime, to_i64},
    models::Recording,
    Database,
};

impl Database {
    pub async fn insert_recording(&self, recording: &Recording) -> Result<()> {
        let record = recording.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO recordings (
                    id,
                    user_id,
                    observed_time,
                    phone_number,
                    duration_seconds,
                    file_name,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.user_id,
                    record.observed_time.to_rfc3339(),
                    record.phone_number,
                    record
                        .duration_seconds
                        .map(to_i64)
                        .transpose()?,
                    record.file_name,
                    record.created_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert recording")?;
            Ok(())
        })
        .await
    }

    pub async fn get_recording(&self, recording_id: &str) -> Result<Option<Recording>> {
        let recording_id = recording_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, observed_time, phone_number, duration_seconds, file_name, created_at
                 FROM recordings
                 WHERE id = ?1",
            )?;

            let mut rows = stmt.query(params![recording_id])?;
            if let Some(row) = rows.next()? {
                Ok(Some(Recording {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    observed_time: parse_datetime(&row.get::<_, String>(2)?, "observed_time")?,
                    phone_number: row.get(3)?,
                    duration_seconds: optional_duration(row.get(4)?, "duration_seconds")?,
                    file_name: row.get(5)?,
                    created_at: parse_datetime(&row.get::<_, String>(6)?, "created_at")?,
                }))
            } else {
                Ok(None)
            }
        })
        .await
    }

    /// Recordings for a user that have not been linked to any call-detail
    /// row yet, oldest first. The review queue starts here.
    pub async fn list_unlinked_recordings(&self, user_id: &str) -> Result<Vec<Recording>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, observed_time, phone_number, duration_seconds, file_name, created_at
                 FROM recordings
                 WHERE user_id = ?1
                   AND id NOT IN (SELECT recording_id FROM links)
                 ORDER BY observed_time ASC",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut recordings = Vec::new();
            while let Some(row) = rows.next()? {
                recordings.push(Recording {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    observed_time: parse_datetime(&row.get::<_, String>(2)?, "observed_time")?,
                    phone_number: row.get(3)?,
                    duration_seconds: optional_duration(row.get(4)?, "duration_seconds")?,
                    file_name: row.get(5)?,
                    created_at: parse_datetime(&row.get::<_, String>(6)?, "created_at")?,
                });
            }

            Ok(recordings)
        })
        .await
    }
}
