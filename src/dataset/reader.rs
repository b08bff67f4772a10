use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::{
    parse_match_date, AnnotatedMatchRecord, Corner, MatchDate, MatchOutcome, MatchRecord,
    RawMatchRecord, SkipReason, WinType,
};
use crate::errors::{read_context, with_read_context};

/// Cleaned match row; extra columns are ignored.
#[derive(Debug, Deserialize)]
struct MatchRow {
    #[serde(rename = "R_fighter")]
    red_fighter: String,
    #[serde(rename = "B_fighter")]
    blue_fighter: String,
    date: String,
    #[serde(rename = "Winner")]
    winner: String,
    #[serde(default)]
    win_type: String,
    #[serde(rename = "Favorite", default)]
    favorite: String,
}

impl From<MatchRow> for RawMatchRecord {
    fn from(row: MatchRow) -> Self {
        RawMatchRecord {
            red_fighter: row.red_fighter,
            blue_fighter: row.blue_fighter,
            date: MatchDate::Text(row.date),
            winner: row.winner,
            win_type: row.win_type,
            favorite: row.favorite,
        }
    }
}

/// Row of a previously written ratings file.
#[derive(Debug, Deserialize)]
struct AnnotatedRow {
    #[serde(rename = "red fighter")]
    red_fighter: String,
    #[serde(rename = "red fighter initial elo")]
    initial_red: f64,
    #[serde(rename = "blue fighter")]
    blue_fighter: String,
    #[serde(rename = "blue fighter initial elo")]
    initial_blue: f64,
    date: String,
    winner: String,
    #[serde(default)]
    win_type: String,
    #[serde(rename = "red fighter new elo")]
    new_red: f64,
    #[serde(rename = "blue fighter new elo")]
    new_blue: f64,
    #[serde(default)]
    favorite: String,
}

impl AnnotatedRow {
    fn into_record(self) -> Result<AnnotatedMatchRecord> {
        let date = parse_match_date(&self.date)?;
        let outcome = match Corner::parse(&self.winner) {
            Some(_) => MatchOutcome::Rated,
            None => MatchOutcome::Skipped(SkipReason::UnrecognizedWinner),
        };

        Ok(AnnotatedMatchRecord {
            record: MatchRecord {
                red_fighter: self.red_fighter,
                blue_fighter: self.blue_fighter,
                date,
                winner: self.winner,
                win_type: WinType::parse(&self.win_type),
                win_type_label: self.win_type,
                favorite: self.favorite,
            },
            initial_red_rating: self.initial_red,
            initial_blue_rating: self.initial_blue,
            new_red_rating: self.new_red,
            new_blue_rating: self.new_blue,
            outcome,
        })
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub fn read_matches<R: Read>(reader: R) -> Result<Vec<RawMatchRecord>, csv::Error> {
    let mut csv_reader = csv_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<MatchRow>() {
        records.push(RawMatchRecord::from(row?));
    }

    Ok(records)
}

pub fn read_matches_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawMatchRecord>> {
    let path_str = path.as_ref().display().to_string();
    let file = with_read_context(File::open(path.as_ref()), &path_str)?;
    let records = with_read_context(read_matches(file), &path_str)?;

    info!("Loaded {} matches from {}", records.len(), path_str);
    Ok(records)
}

/// Loads a ratings file back, oldest match first.
pub fn read_annotated<R: Read>(reader: R) -> Result<Vec<AnnotatedMatchRecord>> {
    let mut csv_reader = csv_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<AnnotatedRow>() {
        records.push(row?.into_record()?);
    }

    // Files are written newest first
    records.reverse();
    records.sort_by_key(|record| record.record.date);
    Ok(records)
}

pub fn read_annotated_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AnnotatedMatchRecord>> {
    let path_str = path.as_ref().display().to_string();
    let file = with_read_context(File::open(path.as_ref()), &path_str)?;
    let records = read_annotated(file).with_context(|| read_context(&path_str))?;

    info!("Loaded {} rated matches from {}", records.len(), path_str);
    Ok(records)
}
