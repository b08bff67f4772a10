pub mod decay;
pub mod elo;
pub mod k_factor;
pub mod ledger;
pub mod processor;
pub mod types;

pub use elo::{expected_score, update, Contender};
pub use k_factor::{FightCountBasis, KFactorSchedule, KFactorTier};
pub use ledger::RatingLedger;
pub use processor::{process_matches, run_fold, MatchProcessor, ProcessorState, RatingRun};
pub use types::{CompetitorRating, CompetitorState, ExperienceLevel, RatingValue};
