use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{optional_duration, parse_datetime, parse_direction, to_i64},
    models::CallRecord,
    Database,
};

fn read_call_record(row: &Row<'_>) -> Result<CallRecord> {
    Ok(CallRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        call_time: parse_datetime(&row.get::<_, String>(2)?, "call_time")?,
        direction: parse_direction(&row.get::<_, String>(3)?)?,
        source_number: row.get(4)?,
        destination_number: row.get(5)?,
        duration_seconds: optional_duration(row.get(6)?, "duration_seconds")?,
        disposition: row.get(7)?,
        time_to_answer_seconds: row.get(8)?,
        imported_at: parse_datetime(&row.get::<_, String>(9)?, "imported_at")?,
    })
}

const CALL_RECORD_COLUMNS: &str = "id, user_id, call_time, direction, source_number, \
     destination_number, duration_seconds, disposition, time_to_answer_seconds, imported_at";

impl Database {
    /// Batch insert one CSV import's worth of call-detail rows.
    pub async fn insert_call_records(&self, records: &[CallRecord]) -> Result<()> {
        let records = records.to_vec();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            for record in &records {
                tx.execute(
                    "INSERT INTO call_records (
                        id,
                        user_id,
                        call_time,
                        direction,
                        source_number,
                        destination_number,
                        duration_seconds,
                        disposition,
                        time_to_answer_seconds,
                        imported_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        record.id,
                        record.user_id,
                        record.call_time.to_rfc3339(),
                        record.direction.as_str(),
                        record.source_number,
                        record.destination_number,
                        record.duration_seconds.map(to_i64).transpose()?,
                        record.disposition,
                        record.time_to_answer_seconds,
                        record.imported_at.to_rfc3339(),
                    ],
                )
                .with_context(|| "failed to insert call record")?;
            }

            tx.commit()?;
            Ok(())
        })
        .await
    }

    pub async fn get_call_record(&self, record_id: &str) -> Result<Option<CallRecord>> {
        let record_id = record_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CALL_RECORD_COLUMNS} FROM call_records WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![record_id])?;
            if let Some(row) = rows.next()? {
                Ok(Some(read_call_record(row)?))
            } else {
                Ok(None)
            }
        })
        .await
    }

    /// Candidate pool for one recording: the user's unlinked call-detail rows
    /// whose call time falls within the tolerance window around the observed
    /// time. Callers must not rely on the ordering; ranking happens later.
    pub async fn find_candidates_near(
        &self,
        user_id: &str,
        observed_time: DateTime<Utc>,
        tolerance_minutes: f64,
    ) -> Result<Vec<CallRecord>> {
        let user_id = user_id.to_string();
        let window = Duration::milliseconds((tolerance_minutes * 60_000.0) as i64);
        let window_start = (observed_time - window).to_rfc3339();
        let window_end = (observed_time + window).to_rfc3339();

        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CALL_RECORD_COLUMNS}
                 FROM call_records
                 WHERE user_id = ?1
                   AND call_time >= ?2
                   AND call_time <= ?3
                   AND id NOT IN (SELECT call_record_id FROM links)
                 ORDER BY call_time ASC"
            ))?;

            let mut rows = stmt.query(params![user_id, window_start, window_end])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(read_call_record(row)?);
            }

            Ok(records)
        })
        .await
    }
}
