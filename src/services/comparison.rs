use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use crate::analysis::{self, BettingComparison, BucketAccuracy};
use crate::config::settings::AppConfig;
use crate::dataset;
use crate::domain::AnnotatedMatchRecord;

/// Optional CSV exports of the disagreement sets.
#[derive(Debug, Default)]
pub struct ComparisonExports {
    pub elo_right_odds_wrong: Option<PathBuf>,
    pub odds_right_elo_wrong: Option<PathBuf>,
    pub incorrect_predictions: Option<PathBuf>,
}

pub struct ModelReport {
    pub name: String,
    pub matches: usize,
    pub accuracy: f64,
    pub buckets: Vec<BucketAccuracy>,
}

pub struct ComparisonReport {
    pub models: Vec<ModelReport>,
    pub betting: BettingComparison,
    pub incorrect_predictions: usize,
}

pub struct ComparisonService {
    config: AppConfig,
}

impl ComparisonService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, inputs: &[PathBuf], exports: &ComparisonExports) -> Result<ComparisonReport> {
        info!("=== Comparing Elo Against Betting Favourites ===");

        let sets = inputs
            .iter()
            .map(dataset::read_annotated_from_path)
            .collect::<Result<Vec<_>>>()?;

        let models = inputs
            .iter()
            .zip(&sets)
            .map(|(path, records)| self.model_report(path, records))
            .collect();

        let betting = analysis::compare_with_favorites(&sets, self.config.rating.starter_rating);
        info!(
            "  → {} matches with rating history, {} Elo-only hits, {} odds-only hits",
            betting.considered,
            betting.elo_right_odds_wrong.len(),
            betting.odds_right_elo_wrong.len()
        );

        let incorrect = analysis::incorrect_predictions(&sets);
        info!("  → {} matches where the higher-rated fighter lost", incorrect.len());

        export(exports.elo_right_odds_wrong.as_deref(), &betting.elo_right_odds_wrong)?;
        export(exports.odds_right_elo_wrong.as_deref(), &betting.odds_right_elo_wrong)?;
        export(exports.incorrect_predictions.as_deref(), &incorrect)?;

        Ok(ComparisonReport {
            models,
            betting,
            incorrect_predictions: incorrect.len(),
        })
    }

    fn model_report(&self, path: &Path, records: &[AnnotatedMatchRecord]) -> ModelReport {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        ModelReport {
            name,
            matches: records.len(),
            accuracy: analysis::overall_accuracy(records),
            buckets: analysis::accuracy_by_rating_diff(records, &self.config.analysis.buckets()),
        }
    }
}

fn export(target: Option<&Path>, records: &[AnnotatedMatchRecord]) -> Result<()> {
    match target {
        Some(path) => dataset::write_annotated_to_path(path, records),
        None => Ok(()),
    }
}
