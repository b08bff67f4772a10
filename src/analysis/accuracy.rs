use crate::domain::{AnnotatedMatchRecord, Corner};

/// Accuracy of the pre-match favourite by Elo within one difference bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketAccuracy {
    pub lower: f64,
    pub upper: f64,
    pub matches: usize,
    /// Percentage, 0 when the bucket is empty
    pub accuracy: f64,
}

impl BucketAccuracy {
    pub fn label(&self) -> String {
        format!("{:.0}-{:.0}", self.lower, self.upper)
    }
}

/// Red is picked on an even rating.
pub fn predict_by_initial(record: &AnnotatedMatchRecord) -> Corner {
    if record.initial_rating_diff() >= 0.0 {
        Corner::Red
    } else {
        Corner::Blue
    }
}

/// Percentage of decided matches where `predict` named the winner.
/// Matches without a Red/Blue winner are left out.
pub fn percentage_correct<'a, I, F>(records: I, predict: F) -> (usize, f64)
where
    I: IntoIterator<Item = &'a AnnotatedMatchRecord>,
    F: Fn(&AnnotatedMatchRecord) -> Corner,
{
    let mut total = 0;
    let mut correct = 0;

    for record in records {
        if let Some(winner) = record.record.winning_corner() {
            total += 1;
            if predict(record) == winner {
                correct += 1;
            }
        }
    }

    if total == 0 {
        (0, 0.0)
    } else {
        (total, correct as f64 * 100.0 / total as f64)
    }
}

pub fn overall_accuracy(records: &[AnnotatedMatchRecord]) -> f64 {
    percentage_correct(records, predict_by_initial).1
}

/// Bounds are inclusive on both ends, so a difference of exactly 50 counts
/// towards both `0-50` and `50-100`.
pub fn accuracy_by_rating_diff(
    records: &[AnnotatedMatchRecord],
    buckets: &[(f64, f64)],
) -> Vec<BucketAccuracy> {
    buckets
        .iter()
        .map(|&(lower, upper)| {
            let in_bucket = records.iter().filter(|record| {
                let diff = record.initial_rating_diff().abs();
                diff >= lower && diff <= upper
            });
            let (matches, accuracy) = percentage_correct(in_bucket, predict_by_initial);
            BucketAccuracy {
                lower,
                upper,
                matches,
                accuracy,
            }
        })
        .collect()
}
