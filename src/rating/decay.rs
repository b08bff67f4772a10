use chrono::NaiveDate;

use crate::config::settings::DecaySettings;

/// Penalty for `inactive_days` without a fight: `min(rate * days, cap)`.
/// `cap` bounds the result from above whatever the signs of `rate` and `cap`.
pub fn decay(inactive_days: u32, rate: f64, cap: f64) -> f64 {
    (rate * inactive_days as f64).min(cap)
}

/// Days since the competitor's previous match, 0 on debut.
pub fn inactive_days(last_match: Option<NaiveDate>, current: NaiveDate) -> u32 {
    match last_match {
        Some(previous) => calculate_gap_days(previous, current),
        None => 0,
    }
}

fn calculate_gap_days(previous: NaiveDate, current: NaiveDate) -> u32 {
    let duration = current.signed_duration_since(previous);
    duration.num_days().clamp(0, u32::MAX as i64) as u32
}

/// Penalty under optional settings; 0 when decay is disabled.
pub fn penalty(settings: Option<&DecaySettings>, last_match: Option<NaiveDate>, current: NaiveDate) -> f64 {
    match settings {
        Some(decay_settings) => decay(
            inactive_days(last_match, current),
            decay_settings.rate,
            decay_settings.cap,
        ),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monotonic_until_cap() {
        let mut previous = decay(0, 0.5, 100.0);
        for days in 1..200 {
            let current = decay(days, 0.5, 100.0);
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(decay(200, 0.5, 100.0), 100.0);
        assert_eq!(decay(10_000, 0.5, 100.0), 100.0);
    }

    #[test]
    fn test_negative_cap_uses_min() {
        // With a positive rate and a negative cap the cap always wins.
        assert_eq!(decay(0, 0.9, -101.0), -101.0);
        assert_eq!(decay(365, 0.9, -101.0), -101.0);
        // Negative rates fall below the cap once they pass it.
        assert_eq!(decay(100, -0.2, 50.0), -20.0);
    }

    #[test]
    fn test_inactive_days() {
        assert_eq!(inactive_days(None, date(2020, 1, 1)), 0);
        assert_eq!(inactive_days(Some(date(2020, 1, 1)), date(2020, 3, 1)), 60);
        assert_eq!(inactive_days(Some(date(2020, 1, 1)), date(2020, 1, 1)), 0);
    }

    #[test]
    fn test_penalty_disabled() {
        assert_eq!(penalty(None, Some(date(2010, 1, 1)), date(2020, 1, 1)), 0.0);
    }

    #[test]
    fn test_penalty_enabled() {
        let settings = DecaySettings { rate: 1.0, cap: 30.0 };
        assert_eq!(penalty(Some(&settings), Some(date(2020, 1, 1)), date(2020, 1, 11)), 10.0);
        assert_eq!(penalty(Some(&settings), Some(date(2019, 1, 1)), date(2020, 1, 1)), 30.0);
        assert_eq!(penalty(Some(&settings), None, date(2020, 1, 1)), 0.0);
    }
}
