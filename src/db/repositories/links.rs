use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::params;
use uuid::Uuid;

use crate::db::{helpers::parse_datetime, models::Link, Database};

impl Database {
    /// Record the confirmed association for a recording. Any prior link for
    /// the same recording is replaced inside the same transaction, so the
    /// one-active-link invariant holds even across re-links.
    pub async fn link_recording(&self, recording_id: &str, call_record_id: &str) -> Result<Link> {
        let link = Link {
            id: Uuid::new_v4().to_string(),
            recording_id: recording_id.to_string(),
            call_record_id: call_record_id.to_string(),
            linked_at: Utc::now(),
        };

        let record = link.clone();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "DELETE FROM links WHERE recording_id = ?1",
                params![record.recording_id],
            )
            .with_context(|| "failed to clear prior link")?;

            tx.execute(
                "INSERT INTO links (id, recording_id, call_record_id, linked_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id,
                    record.recording_id,
                    record.call_record_id,
                    record.linked_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert link")?;

            tx.commit()?;
            Ok(())
        })
        .await?;

        Ok(link)
    }

    pub async fn unlink_recording(&self, recording_id: &str) -> Result<()> {
        let recording_id = recording_id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "DELETE FROM links WHERE recording_id = ?1",
                params![recording_id],
            )
            .with_context(|| "failed to delete link")?;
            Ok(())
        })
        .await
    }

    pub async fn get_link_for_recording(&self, recording_id: &str) -> Result<Option<Link>> {
        let recording_id = recording_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, recording_id, call_record_id, linked_at
                 FROM links
                 WHERE recording_id = ?1",
            )?;

            let mut rows = stmt.query(params![recording_id])?;
            if let Some(row) = rows.next()? {
                Ok(Some(Link {
                    id: row.get(0)?,
                    recording_id: row.get(1)?,
                    call_record_id: row.get(2)?,
                    linked_at: parse_datetime(&row.get::<_, String>(3)?, "linked_at")?,
                }))
            } else {
                Ok(None)
            }
        })
        .await
    }
}
