use anyhow::{anyhow, Result};
use log::info;

use crate::{
    db::{Database, Link, Recording},
    matching::{
        algorithm::{best_match, find_and_rank, ScoredMatch, DEFAULT_MIN_SCORE},
        config::MatchOptions,
        quality::classify_match,
    },
};

/// Drives one recording through candidate retrieval, scoring, and link
/// commit. Retrieval always precedes scoring; the commit is the single,
/// final step and is never retried here.
#[derive(Clone)]
pub struct ReconcileController {
    db: Database,
}

impl ReconcileController {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Ranked matches for one recording, scored against the user's unlinked
    /// call-detail rows near its observed time.
    pub async fn find_matches(
        &self,
        recording_id: &str,
        options: &MatchOptions,
    ) -> Result<Vec<ScoredMatch>> {
        let recording = self.require_recording(recording_id).await?;
        let candidates = self
            .db
            .find_candidates_near(
                &recording.user_id,
                recording.observed_time,
                options.time_tolerance_minutes,
            )
            .await?;

        Ok(find_and_rank(&recording, &candidates, options))
    }

    /// Link automatically only when the best match clears the score floor
    /// and classifies high quality. Everything else returns `None` and stays
    /// in the human review queue.
    pub async fn auto_link(
        &self,
        recording_id: &str,
        options: &MatchOptions,
    ) -> Result<Option<Link>> {
        let ranked = self.find_matches(recording_id, options).await?;

        let best = match best_match(&ranked, DEFAULT_MIN_SCORE) {
            Some(scored) => scored,
            None => return Ok(None),
        };

        if !classify_match(best).is_high_quality {
            return Ok(None);
        }

        let link = self.db.link_recording(recording_id, &best.record.id).await?;
        info!(
            "Auto-linked recording {} to call record {} (score {:.3})",
            recording_id, best.record.id, best.score
        );

        Ok(Some(link))
    }

    /// Commit a reviewer-confirmed pair. Replaces any prior link for the
    /// recording.
    pub async fn confirm_link(&self, recording_id: &str, call_record_id: &str) -> Result<Link> {
        self.require_recording(recording_id).await?;
        self.db
            .get_call_record(call_record_id)
            .await?
            .ok_or_else(|| anyhow!("call record {call_record_id} not found"))?;

        self.db.link_recording(recording_id, call_record_id).await
    }

    pub async fn unlink(&self, recording_id: &str) -> Result<()> {
        self.db.unlink_recording(recording_id).await
    }

    async fn require_recording(&self, recording_id: &str) -> Result<Recording> {
        self.db
            .get_recording(recording_id)
            .await?
            .ok_or_else(|| anyhow!("recording {recording_id} not found"))
    }
}
