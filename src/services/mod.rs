pub mod comparison;
pub mod evaluation;
pub mod rating;

pub use comparison::{ComparisonExports, ComparisonReport, ComparisonService};
pub use evaluation::EvaluationService;
pub use rating::{RatingService, RatingSummary};
