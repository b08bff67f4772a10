pub mod accuracy;
pub mod betting;
pub mod evaluation;

pub use accuracy::{accuracy_by_rating_diff, overall_accuracy, predict_by_initial, BucketAccuracy};
pub use betting::{compare_with_favorites, incorrect_predictions, BettingComparison};
pub use evaluation::{best_trial, evaluate_candidates, evaluate_settings, TrialResult};
