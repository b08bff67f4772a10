use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::analysis::{self, TrialResult};
use crate::config::settings::RatingSettings;
use crate::dataset;
use crate::domain::sort_chronologically;

pub struct EvaluationService {
    candidates: Vec<(String, RatingSettings)>,
}

impl EvaluationService {
    pub fn new(candidates: Vec<(String, RatingSettings)>) -> Self {
        Self { candidates }
    }

    pub fn run(&self, input: &Path) -> Result<Vec<TrialResult>> {
        info!("=== Evaluating {} Parameter Sets ===", self.candidates.len());

        let raw = dataset::read_matches_from_path(input)?;
        let records = sort_chronologically(raw)
            .with_context(|| format!("Failed to order matches in {}", input.display()))?;

        let results = analysis::evaluate_candidates(&records, &self.candidates)
            .context("Parameter evaluation failed")?;

        for result in &results {
            info!(
                "  → {}: {:.2}% (final ratings), {:.2}% (pre-match)",
                result.label, result.final_accuracy, result.pre_match_accuracy
            );
        }

        Ok(results)
    }
}
