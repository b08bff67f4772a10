use chrono::NaiveDate;

use super::models::{MatchDate, MatchRecord, RawMatchRecord, WinType};
use crate::errors::RatingError;

const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

pub fn parse_match_date(value: &str) -> Result<NaiveDate, RatingError> {
    let trimmed = value.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(RatingError::DateFormat {
        value: value.to_string(),
    })
}

fn resolve_date(date: &MatchDate) -> Result<NaiveDate, RatingError> {
    match date {
        MatchDate::Text(text) => parse_match_date(text),
        MatchDate::Parsed(date) => Ok(*date),
    }
}

pub fn normalize_record(raw: RawMatchRecord) -> Result<MatchRecord, RatingError> {
    let date = resolve_date(&raw.date)?;

    Ok(MatchRecord {
        red_fighter: raw.red_fighter,
        blue_fighter: raw.blue_fighter,
        date,
        winner: raw.winner,
        win_type: WinType::parse(&raw.win_type),
        win_type_label: raw.win_type,
        favorite: raw.favorite,
    })
}

/// Normalizes every date and orders the matches oldest first.
/// Fails on the first unparseable date; equal dates keep their input order.
pub fn sort_chronologically(raw: Vec<RawMatchRecord>) -> Result<Vec<MatchRecord>, RatingError> {
    let records = raw
        .into_iter()
        .map(normalize_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sort_by_date(records))
}

pub fn sort_by_date(mut records: Vec<MatchRecord>) -> Vec<MatchRecord> {
    // sort_by_key is stable
    records.sort_by_key(|record| record.date);
    records
}
