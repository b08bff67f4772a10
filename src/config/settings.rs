use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::WinType;
use crate::errors::config_context;
use crate::rating::k_factor::{FightCountBasis, KFactorSchedule, KFactorTier};

pub const STARTER_RATING: f64 = 1000.0;

/// Inactivity penalty: `min(rate * days, cap)` subtracted before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecaySettings {
    pub rate: f64,
    pub cap: f64,
}

/// K-factor multiplier per win type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplierTable {
    pub submission: f64,
    pub knockout: f64,
    pub decision: f64,
    pub unanimous_decision: f64,
    pub dq: f64,
    pub other: f64,
    pub unknown: f64,
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self {
            submission: 1.0,
            knockout: 1.0,
            decision: 1.0,
            unanimous_decision: 1.0,
            dq: 1.0,
            other: 1.0,
            unknown: 1.0,
        }
    }
}

impl MultiplierTable {
    pub fn multiplier(&self, win_type: &WinType) -> f64 {
        match win_type {
            WinType::Submission => self.submission,
            WinType::Knockout => self.knockout,
            WinType::Decision => self.decision,
            WinType::UnanimousDecision => self.unanimous_decision,
            WinType::Dq => self.dq,
            WinType::Other => self.other,
            WinType::Unknown => self.unknown,
            WinType::Unrecognized(_) => 1.0,
        }
    }
}

/// What to do with a match whose winner is neither corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinnerPolicy {
    /// Emit the match unrated and leave the ledger untouched
    #[default]
    Skip,
    /// Abort the pass
    Reject,
}

/// The shipped parameterizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RatingVariant {
    /// Flat K of 32
    Simple,
    /// Three-tier K by career length
    KFactor,
    /// Tiered K with inactivity decay
    Decay,
}

impl RatingVariant {
    pub fn name(&self) -> &'static str {
        match self {
            RatingVariant::Simple => "simple",
            RatingVariant::KFactor => "k-factor",
            RatingVariant::Decay => "decay",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSettings {
    #[serde(default = "default_starter_rating")]
    pub starter_rating: f64,
    #[serde(default)]
    pub decay: Option<DecaySettings>,
    #[serde(default)]
    pub multipliers: MultiplierTable,
    pub k_schedule: KFactorSchedule,
    #[serde(default)]
    pub winner_policy: WinnerPolicy,
}

fn default_starter_rating() -> f64 {
    STARTER_RATING
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self::simple()
    }
}

impl RatingSettings {
    pub fn for_variant(variant: RatingVariant) -> Self {
        match variant {
            RatingVariant::Simple => Self::simple(),
            RatingVariant::KFactor => Self::k_factor(),
            RatingVariant::Decay => Self::decay(),
        }
    }

    pub fn simple() -> Self {
        Self {
            starter_rating: STARTER_RATING,
            decay: None,
            multipliers: MultiplierTable {
                submission: 1.8,
                knockout: 1.8,
                decision: 1.0,
                unanimous_decision: 1.4,
                dq: 0.95,
                other: 1.0,
                unknown: 1.0,
            },
            k_schedule: KFactorSchedule::flat(32.0),
            winner_policy: WinnerPolicy::Skip,
        }
    }

    pub fn k_factor() -> Self {
        Self {
            starter_rating: STARTER_RATING,
            decay: None,
            multipliers: MultiplierTable {
                submission: 1.2,
                knockout: 1.2,
                decision: 1.0,
                unanimous_decision: 1.05,
                dq: 0.95,
                other: 1.0,
                unknown: 1.0,
            },
            k_schedule: KFactorSchedule {
                tiers: vec![KFactorTier { below: 3, k: 401.0 }, KFactorTier { below: 5, k: 331.0 }],
                base: 200.0,
                basis: FightCountBasis::Prior,
            },
            winner_policy: WinnerPolicy::Skip,
        }
    }

    /// Best set found by the exhaustive search over the decay model.
    pub fn decay() -> Self {
        Self {
            starter_rating: STARTER_RATING,
            decay: Some(DecaySettings {
                rate: 0.9,
                cap: -101.0,
            }),
            multipliers: MultiplierTable {
                submission: 1.8,
                knockout: 1.8,
                decision: 1.0,
                unanimous_decision: 1.4,
                dq: 0.95,
                other: 1.0,
                unknown: 1.0,
            },
            k_schedule: KFactorSchedule {
                tiers: vec![KFactorTier { below: 3, k: 301.0 }, KFactorTier { below: 5, k: 201.0 }],
                base: 1.0,
                basis: FightCountBasis::IncludingCurrent,
            },
            winner_policy: WinnerPolicy::Skip,
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let context = config_context(&path.display().to_string());

        let json = fs::read_to_string(path).with_context(|| context.clone())?;
        let settings: Self = serde_json::from_str(&json).with_context(|| context.clone())?;
        settings.k_schedule.validate().with_context(|| context)?;

        Ok(settings)
    }
}

/// Elo-difference buckets used when scoring predictions.
pub struct AnalysisSettings {
    pub bucket_width: f64,
    pub bucket_count: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            bucket_width: 50.0,
            bucket_count: 10,
        }
    }
}

impl AnalysisSettings {
    /// Inclusive `(lower, upper)` bounds, e.g. `(0, 50), (50, 100), ...`
    pub fn buckets(&self) -> Vec<(f64, f64)> {
        (0..self.bucket_count)
            .map(|idx| {
                let lower = idx as f64 * self.bucket_width;
                (lower, lower + self.bucket_width)
            })
            .collect()
    }
}

pub struct AppConfig {
    pub rating: RatingSettings,
    pub analysis: AnalysisSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            analysis: AnalysisSettings::default(),
        }
    }

    pub fn with_rating(rating: RatingSettings) -> Self {
        Self {
            rating,
            analysis: AnalysisSettings::default(),
        }
    }
}
