use chrono::NaiveDate;
use std::collections::HashMap;

use super::types::{CompetitorRating, CompetitorState, ExperienceLevel, RatingValue};
use crate::config::settings::STARTER_RATING;
use crate::domain::CompetitorId;

/// Per-competitor state carried across one pass over the match log.
#[derive(Debug, Clone)]
pub struct RatingLedger {
    starter_rating: RatingValue,
    ratings: HashMap<CompetitorId, RatingValue>,
    fight_counts: HashMap<CompetitorId, u32>,
    last_match_dates: HashMap<CompetitorId, NaiveDate>,
}

impl Default for RatingLedger {
    fn default() -> Self {
        Self::new(STARTER_RATING)
    }
}

impl RatingLedger {
    pub fn new(starter_rating: RatingValue) -> Self {
        Self {
            starter_rating,
            ratings: HashMap::new(),
            fight_counts: HashMap::new(),
            last_match_dates: HashMap::new(),
        }
    }

    /// Current state, registering the competitor with defaults on first sight.
    pub fn get_or_init(&mut self, competitor: &str) -> CompetitorState {
        let rating = *self
            .ratings
            .entry(competitor.to_string())
            .or_insert(self.starter_rating);
        let fight_count = *self.fight_counts.entry(competitor.to_string()).or_insert(0);

        CompetitorState {
            rating,
            fight_count,
            last_match_date: self.last_match_dates.get(competitor).copied(),
        }
    }

    /// Read-only lookup; unseen competitors report defaults.
    pub fn state(&self, competitor: &str) -> CompetitorState {
        CompetitorState {
            rating: self.rating(competitor),
            fight_count: self.fight_counts.get(competitor).copied().unwrap_or(0),
            last_match_date: self.last_match_dates.get(competitor).copied(),
        }
    }

    pub fn rating(&self, competitor: &str) -> RatingValue {
        self.ratings
            .get(competitor)
            .copied()
            .unwrap_or(self.starter_rating)
    }

    pub fn commit(
        &mut self,
        competitor: &str,
        rating: RatingValue,
        fight_count: u32,
        date: NaiveDate,
    ) {
        self.ratings.insert(competitor.to_string(), rating);
        self.fight_counts.insert(competitor.to_string(), fight_count);
        self.last_match_dates.insert(competitor.to_string(), date);
    }

    pub fn contains(&self, competitor: &str) -> bool {
        self.ratings.contains_key(competitor)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// All competitors, highest rating first, ties by name.
    pub fn snapshot(&self) -> Vec<CompetitorRating> {
        let mut standings: Vec<CompetitorRating> = self
            .ratings
            .iter()
            .map(|(competitor, &rating)| {
                let fight_count = self.fight_counts.get(competitor).copied().unwrap_or(0);
                CompetitorRating {
                    competitor: competitor.clone(),
                    rating,
                    fight_count,
                    last_match_date: self.last_match_dates.get(competitor).copied(),
                    experience: ExperienceLevel::from_fight_count(fight_count),
                }
            })
            .collect();

        standings.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.competitor.cmp(&b.competitor))
        });
        standings
    }
}
