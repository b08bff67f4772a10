use super::k_factor::KFactorSchedule;
use crate::config::settings::MultiplierTable;
use crate::domain::WinType;

/// Logistic scale: 400 points = 10:1 odds
const ELO_SCALE: f64 = 400.0;

/// One side of a match as seen by the update rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contender {
    pub rating: f64,
    /// Career fights before this match
    pub prior_fights: u32,
    pub decay_penalty: f64,
}

impl Contender {
    pub fn new(rating: f64, prior_fights: u32) -> Self {
        Self {
            rating,
            prior_fights,
            decay_penalty: 0.0,
        }
    }

    pub fn with_decay(mut self, decay_penalty: f64) -> Self {
        self.decay_penalty = decay_penalty;
        self
    }

    fn decayed_rating(&self) -> f64 {
        self.rating - self.decay_penalty
    }
}

/// Probability that a fighter rated `rating` beats one rated `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / ELO_SCALE))
}

/// New `(winner, loser)` ratings after a decided match.
pub fn update(
    winner: Contender,
    loser: Contender,
    win_type: &WinType,
    multipliers: &MultiplierTable,
    k_schedule: &KFactorSchedule,
) -> (f64, f64) {
    let winner_rating = winner.decayed_rating();
    let loser_rating = loser.decayed_rating();

    let expected_winner = expected_score(winner_rating, loser_rating);
    let expected_loser = expected_score(loser_rating, winner_rating);

    let multiplier = multipliers.multiplier(win_type);
    let k_winner = k_schedule.k_for(winner.prior_fights) * multiplier;
    let k_loser = k_schedule.k_for(loser.prior_fights) * multiplier;

    let new_winner = (winner_rating + k_winner * (1.0 - expected_winner)).round();
    let new_loser = (loser_rating - k_loser * expected_loser).round();

    (new_winner, new_loser)
}
