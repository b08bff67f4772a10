use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::CompetitorId;

pub type RatingValue = f64;

/// Ledger view of one competitor at a point in the fold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetitorState {
    pub rating: RatingValue,
    pub fight_count: u32,
    pub last_match_date: Option<NaiveDate>,
}

/// Final standing of a competitor after a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRating {
    pub competitor: CompetitorId,
    pub rating: RatingValue,
    pub fight_count: u32,
    pub last_match_date: Option<NaiveDate>,
    pub experience: ExperienceLevel,
}

/// How much history backs a rating, by career length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Debutant,    // < 3 fights
    Prospect,    // 3-4 fights
    Established, // 5+ fights
}

impl ExperienceLevel {
    pub fn from_fight_count(fights: u32) -> Self {
        if fights < 3 {
            ExperienceLevel::Debutant
        } else if fights < 5 {
            ExperienceLevel::Prospect
        } else {
            ExperienceLevel::Established
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ExperienceLevel::Debutant => "debutant",
            ExperienceLevel::Prospect => "prospect",
            ExperienceLevel::Established => "established",
        }
    }
}
