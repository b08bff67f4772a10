use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::config::settings::AppConfig;
use crate::dataset;
use crate::domain::sort_chronologically;
use crate::rating::{process_matches, CompetitorRating, RatingRun};

/// Totals of one rating pass, for display.
pub struct RatingSummary {
    pub matches: usize,
    pub rated: usize,
    pub skipped: usize,
    pub unrecognized_win_types: usize,
    pub competitors: usize,
    pub leaders: Vec<CompetitorRating>,
}

pub struct RatingService {
    config: AppConfig,
}

impl RatingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, input: &Path, output: &Path, ledger_output: Option<&Path>) -> Result<RatingSummary> {
        info!("=== Starting Elo Calculation ===");

        let run = self.rate_file(input)?;

        dataset::write_annotated_to_path(output, &run.matches)?;
        info!("  → Annotated matches written to {}", output.display());

        let standings = run.ledger.snapshot();
        if let Some(path) = ledger_output {
            dataset::write_ledger_to_path(path, &standings)?;
            info!("  → Final ratings written to {}", path.display());
        }

        info!("=== Elo Calculation Complete ===");

        Ok(RatingSummary {
            matches: run.matches.len(),
            rated: run.rated,
            skipped: run.skipped,
            unrecognized_win_types: run.unrecognized_win_types,
            competitors: standings.len(),
            leaders: standings.into_iter().take(10).collect(),
        })
    }

    /// Load, sort and fold one match file.
    pub fn rate_file(&self, input: &Path) -> Result<RatingRun> {
        let raw = dataset::read_matches_from_path(input)?;
        info!("  → Loaded {} matches", raw.len());

        let records = sort_chronologically(raw)
            .with_context(|| format!("Failed to order matches in {}", input.display()))?;
        if let (Some(first), Some(last)) = (records.first(), records.last()) {
            info!("  → Matches span {} to {}", first.date, last.date);
        }

        let run = process_matches(records, &self.config.rating)
            .with_context(|| format!("Failed to rate matches in {}", input.display()))?;
        info!(
            "  → Rated {} matches ({} skipped) for {} fighters",
            run.rated,
            run.skipped,
            run.ledger.len()
        );

        Ok(run)
    }
}
