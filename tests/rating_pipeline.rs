use fight_elo::analysis::{accuracy_by_rating_diff, overall_accuracy};
use fight_elo::config::{AnalysisSettings, RatingSettings, WinnerPolicy};
use fight_elo::dataset::{read_annotated, read_matches, write_annotated};
use fight_elo::domain::{sort_chronologically, MatchOutcome, SkipReason};
use fight_elo::errors::RatingError;
use fight_elo::rating::{process_matches, RatingRun};

const MATCHES: &str = "\
R_fighter,B_fighter,date,Winner,win_type,Favorite
Alpha,Bravo,06/01/2020,Blue,knockout,Red
Alpha,Bravo,01/15/2020,Red,decision,Red
Charlie,Delta,03/10/2020,Draw,unknown,Blue
Charlie,Echo,04/01/2020,Red,knockout,Red
";

fn rate(csv: &str, settings: &RatingSettings) -> Result<RatingRun, RatingError> {
    let raw = read_matches(csv.as_bytes()).unwrap();
    let records = sort_chronologically(raw)?;
    process_matches(records, settings)
}

#[test]
fn test_simple_pipeline_ratings() {
    let run = rate(MATCHES, &RatingSettings::simple()).unwrap();

    assert_eq!(run.matches.len(), 4);
    assert_eq!(run.rated, 3);
    assert_eq!(run.skipped, 1);

    let first = &run.matches[0];
    assert_eq!(first.record.red_fighter, "Alpha");
    assert_eq!((first.new_red_rating, first.new_blue_rating), (1016.0, 984.0));

    let draw = &run.matches[1];
    assert_eq!(draw.outcome, MatchOutcome::Skipped(SkipReason::UnrecognizedWinner));
    assert_eq!((draw.new_red_rating, draw.new_blue_rating), (1000.0, 1000.0));

    let knockout = &run.matches[2];
    assert_eq!((knockout.new_red_rating, knockout.new_blue_rating), (1029.0, 971.0));

    let rematch = &run.matches[3];
    assert_eq!((rematch.initial_red_rating, rematch.initial_blue_rating), (1016.0, 984.0));
    assert_eq!((rematch.new_red_rating, rematch.new_blue_rating), (985.0, 1015.0));

    let standings = run.ledger.snapshot();
    let names: Vec<&str> = standings.iter().map(|s| s.competitor.as_str()).collect();
    assert_eq!(names, vec!["Charlie", "Bravo", "Delta", "Alpha", "Echo"]);
    assert_eq!(run.ledger.state("Delta").fight_count, 0);
    assert_eq!(run.ledger.state("Alpha").fight_count, 2);
}

#[test]
fn test_annotated_file_round_trip() {
    let run = rate(MATCHES, &RatingSettings::simple()).unwrap();

    let mut buffer = Vec::new();
    write_annotated(&mut buffer, &run.matches).unwrap();
    let text = String::from_utf8(buffer.clone()).unwrap();
    let first_row = text.lines().nth(1).unwrap();
    assert!(first_row.contains("2020-06-01"));

    let reloaded = read_annotated(buffer.as_slice()).unwrap();
    assert_eq!(reloaded.len(), run.matches.len());
    for (read, written) in reloaded.iter().zip(&run.matches) {
        assert_eq!(read.record.red_fighter, written.record.red_fighter);
        assert_eq!(read.record.date, written.record.date);
        assert_eq!(read.new_red_rating, written.new_red_rating);
        assert_eq!(read.new_blue_rating, written.new_blue_rating);
        assert_eq!(read.outcome, written.outcome);
    }
}

#[test]
fn test_accuracy_over_pipeline_output() {
    let run = rate(MATCHES, &RatingSettings::simple()).unwrap();

    // Two even matches go to Red as predicted; the rematch upset does not.
    let accuracy = overall_accuracy(&run.matches);
    assert!((accuracy - 200.0 / 3.0).abs() < 1e-9);

    let buckets = accuracy_by_rating_diff(&run.matches, &AnalysisSettings::default().buckets());
    assert_eq!(buckets[0].matches, 3);
    assert_eq!(buckets[1].matches, 0);
}

#[test]
fn test_reject_policy_aborts_on_draw() {
    let mut settings = RatingSettings::simple();
    settings.winner_policy = WinnerPolicy::Reject;

    let err = rate(MATCHES, &settings).unwrap_err();
    assert!(matches!(err, RatingError::UnknownWinner { ref winner, .. } if winner == "Draw"));
}

#[test]
fn test_bad_date_is_fatal() {
    let csv = "\
R_fighter,B_fighter,date,Winner,win_type,Favorite
Alpha,Bravo,not-a-date,Red,decision,Red
";
    let err = rate(csv, &RatingSettings::simple()).unwrap_err();
    assert!(matches!(err, RatingError::DateFormat { .. }));
}

#[test]
fn test_bare_unanimous_label_takes_neutral_multiplier() {
    let csv = "\
R_fighter,B_fighter,date,Winner,win_type,Favorite
A,B,2020-01-01,Red,unanimous,Red
C,D,2020-01-02,Red,unanimous decision,Red
";
    let run = rate(csv, &RatingSettings::simple()).unwrap();

    let bare = &run.matches[0];
    assert_eq!((bare.new_red_rating, bare.new_blue_rating), (1016.0, 984.0));
    assert_eq!(bare.record.win_type_label, "unanimous");
    assert_eq!(run.unrecognized_win_types, 1);

    let full = &run.matches[1];
    assert_eq!((full.new_red_rating, full.new_blue_rating), (1022.0, 978.0));
}

#[test]
fn test_output_echoes_input_win_type() {
    let csv = "\
R_fighter,B_fighter,date,Winner,win_type,Favorite
A,B,2020-01-01,Red,split,Red
C,D,2020-01-02,Blue,KNOCKOUT,Red
";
    let run = rate(csv, &RatingSettings::simple()).unwrap();

    let mut buffer = Vec::new();
    write_annotated(&mut buffer, &run.matches).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();

    assert!(rows[0].contains(",Blue,KNOCKOUT,"));
    assert!(rows[1].contains(",Red,split,"));
}

#[test]
fn test_variants_diverge_on_same_log() {
    let simple = rate(MATCHES, &RatingSettings::simple()).unwrap();
    let tiered = rate(MATCHES, &RatingSettings::k_factor()).unwrap();

    // Debut K of 401 dwarfs the flat 32.
    assert!(tiered.ledger.rating("Charlie") > simple.ledger.rating("Charlie"));
    assert_eq!(simple.ledger.len(), tiered.ledger.len());
}
