pub mod settings;

pub use settings::{
    AnalysisSettings, AppConfig, DecaySettings, MultiplierTable, RatingSettings, RatingVariant,
    WinnerPolicy, STARTER_RATING,
};
