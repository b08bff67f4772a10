use rayon::prelude::*;

use super::accuracy::{percentage_correct, predict_by_initial};
use crate::config::settings::RatingSettings;
use crate::domain::{Corner, MatchRecord};
use crate::errors::RatingError;
use crate::rating::{process_matches, RatingLedger};

/// Score of one parameter set over the full match log.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    pub label: String,
    /// Winner predicted from both fighters' ratings after the whole pass.
    /// Matches without a Red/Blue winner are excluded from the denominator
    /// rather than scored as misses.
    pub final_accuracy: f64,
    /// Winner predicted from the ratings each fighter carried into the match
    pub pre_match_accuracy: f64,
    pub matches: usize,
    pub rated: usize,
    pub skipped: usize,
}

fn predict_by_final(ledger: &RatingLedger, record: &MatchRecord) -> Corner {
    if ledger.rating(&record.red_fighter) - ledger.rating(&record.blue_fighter) > 0.0 {
        Corner::Red
    } else {
        Corner::Blue
    }
}

/// Runs one trial on a private copy of the date-ordered `records`.
pub fn evaluate_settings(
    label: &str,
    records: &[MatchRecord],
    settings: &RatingSettings,
) -> Result<TrialResult, RatingError> {
    let run = process_matches(records.to_vec(), settings)?;

    let (_, final_accuracy) = percentage_correct(&run.matches, |annotated| {
        predict_by_final(&run.ledger, &annotated.record)
    });
    let (_, pre_match_accuracy) = percentage_correct(&run.matches, predict_by_initial);

    Ok(TrialResult {
        label: label.to_string(),
        final_accuracy,
        pre_match_accuracy,
        matches: run.matches.len(),
        rated: run.rated,
        skipped: run.skipped,
    })
}

/// Independent trials run in parallel; each owns its ledger. Results keep the candidate order.
pub fn evaluate_candidates(
    records: &[MatchRecord],
    candidates: &[(String, RatingSettings)],
) -> Result<Vec<TrialResult>, RatingError> {
    candidates
        .par_iter()
        .map(|(label, settings)| evaluate_settings(label, records, settings))
        .collect()
}

/// Highest final accuracy; later candidates win ties.
pub fn best_trial(results: &[TrialResult]) -> Option<&TrialResult> {
    results
        .iter()
        .fold(None, |best: Option<&TrialResult>, trial| match best {
            Some(current) if current.final_accuracy > trial.final_accuracy => Some(current),
            _ => Some(trial),
        })
}
