use anyhow::Result;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::AnnotatedMatchRecord;
use crate::errors::with_write_context;
use crate::rating::CompetitorRating;

#[derive(Debug, Serialize)]
struct AnnotatedRow<'a> {
    #[serde(rename = "red fighter")]
    red_fighter: &'a str,
    #[serde(rename = "red fighter initial elo")]
    initial_red: String,
    #[serde(rename = "blue fighter")]
    blue_fighter: &'a str,
    #[serde(rename = "blue fighter initial elo")]
    initial_blue: String,
    date: String,
    winner: &'a str,
    win_type: &'a str,
    #[serde(rename = "red fighter new elo")]
    new_red: String,
    #[serde(rename = "blue fighter new elo")]
    new_blue: String,
    favorite: &'a str,
}

impl<'a> From<&'a AnnotatedMatchRecord> for AnnotatedRow<'a> {
    fn from(annotated: &'a AnnotatedMatchRecord) -> Self {
        let record = &annotated.record;
        AnnotatedRow {
            red_fighter: &record.red_fighter,
            initial_red: format_rating(annotated.initial_red_rating),
            blue_fighter: &record.blue_fighter,
            initial_blue: format_rating(annotated.initial_blue_rating),
            date: record.date.format("%Y-%m-%d").to_string(),
            winner: &record.winner,
            win_type: &record.win_type_label,
            new_red: format_rating(annotated.new_red_rating),
            new_blue: format_rating(annotated.new_blue_rating),
            favorite: &record.favorite,
        }
    }
}

#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    fighter: &'a str,
    elo: String,
    fights: u32,
    #[serde(rename = "last fight")]
    last_fight: String,
    experience: &'a str,
}

/// Ratings are whole numbers after every update; write them without a fraction.
pub fn format_rating(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Writes oldest-first `records` newest first.
pub fn write_annotated<W: Write>(writer: W, records: &[AnnotatedMatchRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records.iter().rev() {
        csv_writer.serialize(AnnotatedRow::from(record))?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_annotated_to_path<P: AsRef<Path>>(path: P, records: &[AnnotatedMatchRecord]) -> Result<()> {
    let path_str = path.as_ref().display().to_string();
    let file = with_write_context(File::create(path.as_ref()), &path_str)?;
    with_write_context(write_annotated(file, records), &path_str)?;

    info!("Elo scores calculated and saved to {}", path_str);
    Ok(())
}

pub fn write_ledger<W: Write>(writer: W, standings: &[CompetitorRating]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for standing in standings {
        csv_writer.serialize(LedgerRow {
            fighter: &standing.competitor,
            elo: format_rating(standing.rating),
            fights: standing.fight_count,
            last_fight: standing
                .last_match_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            experience: standing.experience.as_str(),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_ledger_to_path<P: AsRef<Path>>(path: P, standings: &[CompetitorRating]) -> Result<()> {
    let path_str = path.as_ref().display().to_string();
    let file = with_write_context(File::create(path.as_ref()), &path_str)?;
    with_write_context(write_ledger(file, standings), &path_str)?;

    info!("Final ratings for {} fighters saved to {}", standings.len(), path_str);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::reader::read_annotated;
    use crate::domain::{MatchOutcome, MatchRecord, WinType};
    use crate::rating::ExperienceLevel;
    use chrono::NaiveDate;

    fn annotated(red: &str, blue: &str, day: u32, new_red: f64, new_blue: f64) -> AnnotatedMatchRecord {
        AnnotatedMatchRecord {
            record: MatchRecord {
                red_fighter: red.to_string(),
                blue_fighter: blue.to_string(),
                date: NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
                winner: "Red".to_string(),
                win_type: WinType::UnanimousDecision,
                win_type_label: "unanimous decision".to_string(),
                favorite: "Blue".to_string(),
            },
            initial_red_rating: 1000.0,
            initial_blue_rating: 1000.0,
            new_red_rating: new_red,
            new_blue_rating: new_blue,
            outcome: MatchOutcome::Rated,
        }
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(1016.0), "1016");
        assert_eq!(format_rating(-3.0), "-3");
        assert_eq!(format_rating(1000.5), "1000.5");
    }

    #[test]
    fn test_write_annotated_newest_first() {
        let records = vec![
            annotated("A", "B", 1, 1022.0, 978.0),
            annotated("C", "D", 2, 1022.0, 978.0),
        ];
        let mut buffer = Vec::new();
        write_annotated(&mut buffer, &records).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "red fighter,red fighter initial elo,blue fighter,blue fighter initial elo,date,winner,win_type,red fighter new elo,blue fighter new elo,favorite"
        );
        assert_eq!(lines[1], "C,1000,D,1000,2020-01-02,Red,unanimous decision,1022,978,Blue");
        assert_eq!(lines[2], "A,1000,B,1000,2020-01-01,Red,unanimous decision,1022,978,Blue");

        let restored = read_annotated(text.as_bytes()).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn test_win_type_written_as_read() {
        let raw = crate::domain::RawMatchRecord {
            red_fighter: "E".to_string(),
            blue_fighter: "F".to_string(),
            date: "03/07/2020".into(),
            winner: "Blue".to_string(),
            win_type: "split".to_string(),
            favorite: "Red".to_string(),
        };
        let record = crate::domain::chronology::normalize_record(raw).unwrap();
        assert_eq!(record.win_type, WinType::Decision);

        let records = vec![AnnotatedMatchRecord {
            record,
            initial_red_rating: 1000.0,
            initial_blue_rating: 1000.0,
            new_red_rating: 984.0,
            new_blue_rating: 1016.0,
            outcome: MatchOutcome::Rated,
        }];
        let mut buffer = Vec::new();
        write_annotated(&mut buffer, &records).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(1), Some("E,1000,F,1000,2020-03-07,Blue,split,984,1016,Red"));

        let restored = read_annotated(text.as_bytes()).unwrap();
        assert_eq!(restored[0].record.win_type_label, "split");
        assert_eq!(restored[0].record.win_type, WinType::Decision);
    }

    #[test]
    fn test_write_ledger() {
        let standings = vec![CompetitorRating {
            competitor: "A".to_string(),
            rating: 1016.0,
            fight_count: 1,
            last_match_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            experience: ExperienceLevel::Debutant,
        }];
        let mut buffer = Vec::new();
        write_ledger(&mut buffer, &standings).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "fighter,elo,fights,last fight,experience\nA,1016,1,2020-01-01,debutant\n"
        );
    }
}
