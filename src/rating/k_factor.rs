use serde::{Deserialize, Serialize};

use crate::errors::RatingError;

/// One step of the schedule: careers shorter than `below` fights use `k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KFactorTier {
    pub below: u32,
    pub k: f64,
}

/// Which fight count the schedule is looked up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightCountBasis {
    /// Career fights before the current match
    #[default]
    Prior,
    /// Career fights counting the current match
    IncludingCurrent,
}

/// Step function from career fight count to K-factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KFactorSchedule {
    #[serde(default)]
    pub tiers: Vec<KFactorTier>,
    pub base: f64,
    #[serde(default)]
    pub basis: FightCountBasis,
}

impl KFactorSchedule {
    /// Same K for every fighter.
    pub fn flat(k: f64) -> Self {
        Self {
            tiers: Vec::new(),
            base: k,
            basis: FightCountBasis::Prior,
        }
    }

    pub fn tiered(tiers: Vec<KFactorTier>, base: f64, basis: FightCountBasis) -> Result<Self, RatingError> {
        let schedule = Self { tiers, base, basis };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Tiers must be ordered by strictly increasing `below`.
    pub fn validate(&self) -> Result<(), RatingError> {
        for pair in self.tiers.windows(2) {
            if pair[0].below >= pair[1].below {
                return Err(RatingError::InvalidSchedule(format!(
                    "tier thresholds must increase, got {} then {}",
                    pair[0].below, pair[1].below
                )));
            }
        }

        if let Some(tier) = self.tiers.iter().find(|tier| !tier.k.is_finite()) {
            return Err(RatingError::InvalidSchedule(format!(
                "K for fighters below {} fights is not finite",
                tier.below
            )));
        }

        if !self.base.is_finite() {
            return Err(RatingError::InvalidSchedule("base K is not finite".to_string()));
        }

        Ok(())
    }

    /// K for a fighter with `prior_fights` career fights before this match.
    pub fn k_for(&self, prior_fights: u32) -> f64 {
        let count = match self.basis {
            FightCountBasis::Prior => prior_fights,
            FightCountBasis::IncludingCurrent => prior_fights.saturating_add(1),
        };
        self.k_factor(count)
    }

    /// Raw lookup, ignoring the basis.
    pub fn k_factor(&self, fight_count: u32) -> f64 {
        self.tiers
            .iter()
            .find(|tier| fight_count < tier.below)
            .map(|tier| tier.k)
            .unwrap_or(self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tier(basis: FightCountBasis) -> KFactorSchedule {
        KFactorSchedule::tiered(
            vec![KFactorTier { below: 3, k: 401.0 }, KFactorTier { below: 5, k: 331.0 }],
            200.0,
            basis,
        )
        .unwrap()
    }

    #[test]
    fn test_three_tier_lookup() {
        let schedule = three_tier(FightCountBasis::Prior);
        assert_eq!(schedule.k_factor(0), 401.0);
        assert_eq!(schedule.k_factor(2), 401.0);
        assert_eq!(schedule.k_factor(3), 331.0);
        assert_eq!(schedule.k_factor(4), 331.0);
        assert_eq!(schedule.k_factor(5), 200.0);
        assert_eq!(schedule.k_factor(40), 200.0);
    }

    #[test]
    fn test_including_current_shifts_lookup() {
        let schedule = three_tier(FightCountBasis::IncludingCurrent);
        assert_eq!(schedule.k_for(1), 401.0);
        assert_eq!(schedule.k_for(2), 331.0);
        assert_eq!(schedule.k_for(4), 200.0);
    }

    #[test]
    fn test_flat_schedule() {
        let schedule = KFactorSchedule::flat(32.0);
        assert_eq!(schedule.k_for(0), 32.0);
        assert_eq!(schedule.k_for(100), 32.0);
    }

    #[test]
    fn test_unordered_tiers_rejected() {
        let result = KFactorSchedule::tiered(
            vec![KFactorTier { below: 5, k: 300.0 }, KFactorTier { below: 3, k: 400.0 }],
            100.0,
            FightCountBasis::Prior,
        );
        assert!(matches!(result, Err(RatingError::InvalidSchedule(_))));
    }

    #[test]
    fn test_schedule_from_json() {
        let json = r#"{"tiers":[{"below":3,"k":301},{"below":5,"k":201}],"base":1,"basis":"including_current"}"#;
        let schedule: KFactorSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.basis, FightCountBasis::IncludingCurrent);
        assert_eq!(schedule.k_factor(2), 301.0);
        assert_eq!(schedule.k_factor(9), 1.0);
    }
}
