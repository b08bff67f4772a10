pub mod chronology;
pub mod models;
pub mod progress;

pub use chronology::{parse_match_date, sort_by_date, sort_chronologically};
pub use models::{
    AnnotatedMatchRecord, CompetitorId, Corner, MatchDate, MatchOutcome, MatchRecord,
    RawMatchRecord, SkipReason, WinType,
};
pub use progress::FoldProgress;
