use chrono::NaiveDate;
use log::info;

use super::models::{AnnotatedMatchRecord, MatchOutcome};

const LOG_EVERY: usize = 1000;

/// Tracks how far through the match history the rating fold has come
pub struct FoldProgress {
    total: usize,
    rated: usize,
    skipped: usize,
    reached: Option<NaiveDate>,
}

impl FoldProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            rated: 0,
            skipped: 0,
            reached: None,
        }
    }

    pub fn record(&mut self, annotated: &AnnotatedMatchRecord) {
        match annotated.outcome {
            MatchOutcome::Rated => self.rated += 1,
            MatchOutcome::Skipped(_) => self.skipped += 1,
        }
        self.reached = Some(annotated.record.date);

        let processed = self.processed();
        if processed % LOG_EVERY == 0 || processed == self.total {
            self.log_progress();
        }
    }

    pub fn processed(&self) -> usize {
        self.rated + self.skipped
    }

    pub fn rated(&self) -> usize {
        self.rated
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Date of the latest match folded in.
    pub fn reached(&self) -> Option<NaiveDate> {
        self.reached
    }

    fn log_progress(&self) {
        if let Some(date) = self.reached {
            info!(
                "  → Ratings current to {}: {}/{} matches ({} skipped)",
                date,
                self.processed(),
                self.total,
                self.skipped
            );
        }
    }
}
