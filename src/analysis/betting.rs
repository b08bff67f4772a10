use std::collections::HashSet;

use crate::dataset::writer::format_rating;
use crate::domain::{AnnotatedMatchRecord, Corner};

/// Where the Elo pick and the betting favourite disagreed on the result.
#[derive(Debug, Clone, Default)]
pub struct BettingComparison {
    /// Matches where both fighters already had a rating history
    pub considered: usize,
    pub elo_correct: usize,
    pub favorite_correct: usize,
    pub elo_right_odds_wrong: Vec<AnnotatedMatchRecord>,
    pub odds_right_elo_wrong: Vec<AnnotatedMatchRecord>,
}

impl BettingComparison {
    pub fn elo_accuracy(&self) -> f64 {
        percentage(self.elo_correct, self.considered)
    }

    pub fn favorite_accuracy(&self) -> f64 {
        percentage(self.favorite_correct, self.considered)
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Higher pre-match rating, Blue on a tie.
pub fn higher_rated_corner(record: &AnnotatedMatchRecord) -> Corner {
    if record.initial_red_rating > record.initial_blue_rating {
        Corner::Red
    } else {
        Corner::Blue
    }
}

/// Compares the Elo pick with the betting favourite across one or more rating runs.
/// Matches involving a fighter still on `starter_rating` carry no Elo signal and are left out.
pub fn compare_with_favorites(
    sets: &[Vec<AnnotatedMatchRecord>],
    starter_rating: f64,
) -> BettingComparison {
    let mut comparison = BettingComparison::default();
    let mut seen_elo_right = HashSet::new();
    let mut seen_odds_right = HashSet::new();

    for record in sets.iter().flatten() {
        if record.initial_red_rating == starter_rating || record.initial_blue_rating == starter_rating {
            continue;
        }

        comparison.considered += 1;
        let actual = record.record.winning_corner();
        let elo_right = actual == Some(higher_rated_corner(record));
        let odds_right = actual.is_some() && record.record.favorite_corner() == actual;

        if elo_right {
            comparison.elo_correct += 1;
        }
        if odds_right {
            comparison.favorite_correct += 1;
        }

        if elo_right && !odds_right && seen_elo_right.insert(dedup_key(record)) {
            comparison.elo_right_odds_wrong.push(record.clone());
        }
        if odds_right && !elo_right && seen_odds_right.insert(dedup_key(record)) {
            comparison.odds_right_elo_wrong.push(record.clone());
        }
    }

    comparison
}

/// Matches the higher-rated fighter did not win, deduplicated across runs.
pub fn incorrect_predictions(sets: &[Vec<AnnotatedMatchRecord>]) -> Vec<AnnotatedMatchRecord> {
    let mut seen = HashSet::new();

    sets.iter()
        .flatten()
        .filter(|record| record.record.winning_corner() != Some(higher_rated_corner(record)))
        .filter(|record| seen.insert(dedup_key(record)))
        .cloned()
        .collect()
}

/// Identity of a written row; identical rows from different runs collapse.
fn dedup_key(record: &AnnotatedMatchRecord) -> String {
    let inner = &record.record;
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
        inner.red_fighter,
        format_rating(record.initial_red_rating),
        inner.blue_fighter,
        format_rating(record.initial_blue_rating),
        inner.date,
        inner.winner,
        inner.win_type_label,
        format_rating(record.new_red_rating),
        format_rating(record.new_blue_rating),
        inner.favorite,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchOutcome, MatchRecord, WinType};
    use chrono::NaiveDate;

    fn rated(red: f64, blue: f64, winner: &str, favorite: &str) -> AnnotatedMatchRecord {
        AnnotatedMatchRecord {
            record: MatchRecord {
                red_fighter: "R".to_string(),
                blue_fighter: "B".to_string(),
                date: NaiveDate::from_ymd_opt(2021, 4, 10).unwrap(),
                winner: winner.to_string(),
                win_type: WinType::Knockout,
                win_type_label: "knockout".to_string(),
                favorite: favorite.to_string(),
            },
            initial_red_rating: red,
            initial_blue_rating: blue,
            new_red_rating: red,
            new_blue_rating: blue,
            outcome: MatchOutcome::Rated,
        }
    }

    #[test]
    fn test_tie_goes_to_blue() {
        assert_eq!(higher_rated_corner(&rated(1010.0, 1010.0, "Red", "Red")), Corner::Blue);
    }

    #[test]
    fn test_compare_splits_disagreements() {
        let run = vec![
            rated(1100.0, 1050.0, "Red", "Blue"),  // elo right, odds wrong
            rated(1100.0, 1050.0, "Blue", "Blue"), // odds right, elo wrong
            rated(1100.0, 1050.0, "Red", "Red"),   // both right
            rated(1000.0, 1050.0, "Red", "Blue"),  // debutant, ignored
            rated(1100.0, 1050.0, "Red", "Even"),  // elo right, no favourite
        ];
        let comparison = compare_with_favorites(&[run], 1000.0);

        assert_eq!(comparison.considered, 4);
        assert_eq!(comparison.elo_correct, 3);
        assert_eq!(comparison.favorite_correct, 2);
        assert_eq!(comparison.elo_right_odds_wrong.len(), 2);
        assert_eq!(comparison.odds_right_elo_wrong.len(), 1);
        assert_eq!(comparison.elo_accuracy(), 75.0);
        assert_eq!(comparison.favorite_accuracy(), 50.0);
    }

    #[test]
    fn test_undecided_match_credits_neither_pick() {
        let run = vec![rated(1100.0, 1050.0, "Draw", "Draw")];
        let comparison = compare_with_favorites(&[run], 1000.0);

        assert_eq!(comparison.considered, 1);
        assert_eq!(comparison.elo_correct, 0);
        assert_eq!(comparison.favorite_correct, 0);
        assert!(comparison.odds_right_elo_wrong.is_empty());
    }

    #[test]
    fn test_duplicates_across_runs_collapse() {
        let run = vec![rated(1100.0, 1050.0, "Red", "Blue")];
        let comparison = compare_with_favorites(&[run.clone(), run], 1000.0);

        assert_eq!(comparison.considered, 2);
        assert_eq!(comparison.elo_right_odds_wrong.len(), 1);
    }

    #[test]
    fn test_incorrect_predictions() {
        let first = vec![rated(1000.0, 1000.0, "Red", "Red"), rated(1200.0, 1000.0, "Red", "Red")];
        let second = vec![rated(1000.0, 1000.0, "Red", "Red"), rated(900.0, 1000.0, "Red", "Red")];
        let missed = incorrect_predictions(&[first, second]);

        assert_eq!(missed.len(), 2);
        assert_eq!(missed[1].initial_red_rating, 900.0);
    }
}
