use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type CompetitorId = String;

/// Corner a competitor fought from. The data labels competitor A as red and B as blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    Red,
    Blue,
}

impl Corner {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Red" => Some(Corner::Red),
            "Blue" => Some(Corner::Blue),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::Red => "Red",
            Corner::Blue => "Blue",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WinType {
    Submission,
    Knockout,
    /// Split or majority decision
    Decision,
    UnanimousDecision,
    Dq,
    Other,
    Unknown,
    /// Any label outside the known set; rated with a neutral multiplier.
    Unrecognized(String),
}

impl WinType {
    /// `split` rates as a decision. The cleaned data's bare `unanimous` is left
    /// unrecognized, so it takes the neutral multiplier rather than the
    /// `unanimous decision` entry.
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "submission" => WinType::Submission,
            "knockout" => WinType::Knockout,
            "decision" | "split" => WinType::Decision,
            "unanimous decision" | "unanimous_decision" => WinType::UnanimousDecision,
            "dq" => WinType::Dq,
            "other" => WinType::Other,
            "unknown" | "" => WinType::Unknown,
            _ => WinType::Unrecognized(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WinType::Submission => "submission",
            WinType::Knockout => "knockout",
            WinType::Decision => "decision",
            WinType::UnanimousDecision => "unanimous decision",
            WinType::Dq => "dq",
            WinType::Other => "other",
            WinType::Unknown => "unknown",
            WinType::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, WinType::Unrecognized(_))
    }
}

impl fmt::Display for WinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date as it arrives from the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchDate {
    Text(String),
    Parsed(NaiveDate),
}

impl From<&str> for MatchDate {
    fn from(value: &str) -> Self {
        MatchDate::Text(value.to_string())
    }
}

impl From<NaiveDate> for MatchDate {
    fn from(value: NaiveDate) -> Self {
        MatchDate::Parsed(value)
    }
}

/// Match row before its date has been normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatchRecord {
    pub red_fighter: CompetitorId,
    pub blue_fighter: CompetitorId,
    pub date: MatchDate,
    pub winner: String,
    pub win_type: String,
    pub favorite: String,
}

/// Match ready for the rating fold.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub red_fighter: CompetitorId,
    pub blue_fighter: CompetitorId,
    pub date: NaiveDate,
    pub winner: String,
    pub win_type: WinType,
    /// Label exactly as read, echoed to output files
    pub win_type_label: String,
    pub favorite: String,
}

impl MatchRecord {
    pub fn winning_corner(&self) -> Option<Corner> {
        Corner::parse(&self.winner)
    }

    /// Betting favorite, `None` when the odds were even or missing.
    pub fn favorite_corner(&self) -> Option<Corner> {
        Corner::parse(&self.favorite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnrecognizedWinner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Rated,
    Skipped(SkipReason),
}

/// A processed match with the ratings both fighters carried in and out.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedMatchRecord {
    pub record: MatchRecord,
    pub initial_red_rating: f64,
    pub initial_blue_rating: f64,
    pub new_red_rating: f64,
    pub new_blue_rating: f64,
    pub outcome: MatchOutcome,
}

impl AnnotatedMatchRecord {
    /// Red minus blue, using the ratings both fighters had before the match.
    pub fn initial_rating_diff(&self) -> f64 {
        self.initial_red_rating - self.initial_blue_rating
    }
}
