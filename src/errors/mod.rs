use anyhow::Context as _;
use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised by the rating core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatingError {
    #[error("no valid date format found for '{value}' (expected MM/DD/YYYY or YYYY-MM-DD)")]
    DateFormat { value: String },

    #[error("winner '{winner}' matches neither corner in {red} vs {blue} on {date}")]
    UnknownWinner {
        red: String,
        blue: String,
        date: NaiveDate,
        winner: String,
    },

    #[error("match on {date} arrived after a match dated {previous}")]
    OutOfOrder { date: NaiveDate, previous: NaiveDate },

    #[error("invalid K-factor schedule: {0}")]
    InvalidSchedule(String),

    #[error("match processor already finished its pass")]
    ProcessorFinished,
}

/// Add context to read errors
pub fn read_context(path: &str) -> String {
    format!("Failed to read match data from: {}", path)
}

/// Add context to write errors
pub fn write_context(path: &str) -> String {
    format!("Failed to write results to: {}", path)
}

/// Add context to config errors
pub fn config_context(path: &str) -> String {
    format!("Failed to load rating settings from: {}", path)
}

/// Wrap result with read context
pub fn with_read_context<T, E>(result: Result<T, E>, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(read_context(path))
}

/// Wrap result with write context
pub fn with_write_context<T, E>(result: Result<T, E>, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(write_context(path))
}
