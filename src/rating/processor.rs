use chrono::NaiveDate;
use log::{debug, info, warn};

use super::decay;
use super::elo::{self, Contender};
use super::ledger::RatingLedger;
use super::types::CompetitorState;
use crate::config::settings::{RatingSettings, WinnerPolicy};
use crate::domain::{
    AnnotatedMatchRecord, Corner, FoldProgress, MatchOutcome, MatchRecord, SkipReason,
};
use crate::errors::RatingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    NotStarted,
    Processing { next_index: usize },
    Completed,
}

/// Sequential fold over date-ordered matches. Owns no competitor state itself;
/// every read and commit goes through the borrowed ledger.
pub struct MatchProcessor<'a> {
    settings: &'a RatingSettings,
    ledger: &'a mut RatingLedger,
    state: ProcessorState,
    last_date: Option<NaiveDate>,
}

impl<'a> MatchProcessor<'a> {
    pub fn new(settings: &'a RatingSettings, ledger: &'a mut RatingLedger) -> Self {
        Self {
            settings,
            ledger,
            state: ProcessorState::NotStarted,
            last_date: None,
        }
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    pub fn process_match(&mut self, record: MatchRecord) -> Result<AnnotatedMatchRecord, RatingError> {
        let next_index = match self.state {
            ProcessorState::NotStarted => 0,
            ProcessorState::Processing { next_index } => next_index,
            ProcessorState::Completed => return Err(RatingError::ProcessorFinished),
        };

        self.check_order(record.date)?;

        let red = self.ledger.get_or_init(&record.red_fighter);
        let blue = self.ledger.get_or_init(&record.blue_fighter);

        let annotated = match record.winning_corner() {
            Some(corner) => self.rate_match(record, red, blue, corner),
            None => self.handle_unknown_winner(record, red, blue)?,
        };

        self.last_date = Some(annotated.record.date);
        self.state = ProcessorState::Processing {
            next_index: next_index + 1,
        };

        Ok(annotated)
    }

    pub fn finish(&mut self) {
        self.state = ProcessorState::Completed;
    }

    fn check_order(&self, date: NaiveDate) -> Result<(), RatingError> {
        match self.last_date {
            Some(previous) if date < previous => Err(RatingError::OutOfOrder { date, previous }),
            _ => Ok(()),
        }
    }

    fn rate_match(
        &mut self,
        record: MatchRecord,
        red: CompetitorState,
        blue: CompetitorState,
        winning_corner: Corner,
    ) -> AnnotatedMatchRecord {
        let red_contender = self.contender(&red, record.date);
        let blue_contender = self.contender(&blue, record.date);

        let (new_red, new_blue) = match winning_corner {
            Corner::Red => elo::update(
                red_contender,
                blue_contender,
                &record.win_type,
                &self.settings.multipliers,
                &self.settings.k_schedule,
            ),
            Corner::Blue => {
                let (new_blue, new_red) = elo::update(
                    blue_contender,
                    red_contender,
                    &record.win_type,
                    &self.settings.multipliers,
                    &self.settings.k_schedule,
                );
                (new_red, new_blue)
            }
        };

        if !record.win_type.is_recognized() {
            debug!(
                "Unrecognized win type '{}' for {} vs {} on {}, using neutral multiplier",
                record.win_type, record.red_fighter, record.blue_fighter, record.date
            );
        }

        self.ledger
            .commit(&record.red_fighter, new_red, red.fight_count + 1, record.date);
        self.ledger
            .commit(&record.blue_fighter, new_blue, blue.fight_count + 1, record.date);

        AnnotatedMatchRecord {
            record,
            initial_red_rating: red.rating,
            initial_blue_rating: blue.rating,
            new_red_rating: new_red,
            new_blue_rating: new_blue,
            outcome: MatchOutcome::Rated,
        }
    }

    fn handle_unknown_winner(
        &self,
        record: MatchRecord,
        red: CompetitorState,
        blue: CompetitorState,
    ) -> Result<AnnotatedMatchRecord, RatingError> {
        match self.settings.winner_policy {
            WinnerPolicy::Reject => Err(RatingError::UnknownWinner {
                red: record.red_fighter,
                blue: record.blue_fighter,
                date: record.date,
                winner: record.winner,
            }),
            WinnerPolicy::Skip => {
                debug!(
                    "Skipping {} vs {} on {}: winner '{}' matches neither corner",
                    record.red_fighter, record.blue_fighter, record.date, record.winner
                );
                Ok(AnnotatedMatchRecord {
                    record,
                    initial_red_rating: red.rating,
                    initial_blue_rating: blue.rating,
                    new_red_rating: red.rating,
                    new_blue_rating: blue.rating,
                    outcome: MatchOutcome::Skipped(SkipReason::UnrecognizedWinner),
                })
            }
        }
    }

    fn contender(&self, state: &CompetitorState, date: NaiveDate) -> Contender {
        let penalty = decay::penalty(self.settings.decay.as_ref(), state.last_match_date, date);
        Contender::new(state.rating, state.fight_count).with_decay(penalty)
    }
}

/// Outcome of one full pass.
#[derive(Debug, Clone)]
pub struct RatingRun {
    /// Oldest first
    pub matches: Vec<AnnotatedMatchRecord>,
    pub ledger: RatingLedger,
    pub rated: usize,
    pub skipped: usize,
    pub unrecognized_win_types: usize,
}

/// Folds date-ordered matches into `ledger`.
pub fn run_fold(
    ledger: &mut RatingLedger,
    records: Vec<MatchRecord>,
    settings: &RatingSettings,
) -> Result<(Vec<AnnotatedMatchRecord>, FoldProgress), RatingError> {
    let mut progress = FoldProgress::new(records.len());
    let mut annotated = Vec::with_capacity(records.len());
    let mut processor = MatchProcessor::new(settings, ledger);

    for record in records {
        let processed = processor.process_match(record)?;
        progress.record(&processed);
        annotated.push(processed);
    }

    processor.finish();
    Ok((annotated, progress))
}

/// Runs a pass with a private ledger seeded from `settings`.
pub fn process_matches(
    records: Vec<MatchRecord>,
    settings: &RatingSettings,
) -> Result<RatingRun, RatingError> {
    info!("Calculating Elo ratings for {} matches", records.len());

    let mut ledger = RatingLedger::new(settings.starter_rating);
    let (matches, progress) = run_fold(&mut ledger, records, settings)?;

    let unrecognized_win_types = matches
        .iter()
        .filter(|m| !m.record.win_type.is_recognized())
        .count();

    if progress.skipped() > 0 {
        warn!(
            "{} matches had a winner matching neither corner and were left unrated",
            progress.skipped()
        );
    }
    if unrecognized_win_types > 0 {
        warn!(
            "{} matches had an unrecognized win type and used a neutral multiplier",
            unrecognized_win_types
        );
    }

    info!("Rated {} competitors", ledger.len());

    Ok(RatingRun {
        matches,
        ledger,
        rated: progress.rated(),
        skipped: progress.skipped(),
        unrecognized_win_types,
    })
}
