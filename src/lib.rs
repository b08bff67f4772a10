pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};

use crate::analysis::best_trial;
use crate::cli::Command;
use crate::config::settings::{AppConfig, RatingSettings, RatingVariant, WinnerPolicy};
use crate::services::{ComparisonExports, ComparisonService, EvaluationService, RatingService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_rate(
    input: &Path,
    output: &Path,
    variant: RatingVariant,
    config: Option<&Path>,
    ratings_output: Option<&Path>,
    strict: bool,
) -> Result<()> {
    let mut settings = match config {
        Some(path) => RatingSettings::from_json_file(path)?,
        None => RatingSettings::for_variant(variant),
    };
    if strict {
        settings.winner_policy = WinnerPolicy::Reject;
    }

    let service = RatingService::new(AppConfig::with_rating(settings));
    let summary = service.run(input, output, ratings_output)?;

    println!(
        "{} {} matches ({} rated, {} skipped), {} fighters",
        "Rated".green().bold(),
        summary.matches,
        summary.rated,
        summary.skipped,
        summary.competitors
    );
    if summary.unrecognized_win_types > 0 {
        println!(
            "{} {} matches had an unrecognized win type and used multiplier 1.0",
            "Note:".yellow(),
            summary.unrecognized_win_types
        );
    }
    for (rank, standing) in summary.leaders.iter().enumerate() {
        println!(
            "{:>3}. {:<30} {:>6} ({} fights)",
            rank + 1,
            standing.competitor,
            standing.rating,
            standing.fight_count
        );
    }
    Ok(())
}

pub fn handle_compare(inputs: &[PathBuf], exports: ComparisonExports) -> Result<()> {
    let service = ComparisonService::new(AppConfig::new());
    let report = service.run(inputs, &exports)?;

    for model in &report.models {
        println!(
            "{} {} matches, {:.2}% picked by higher initial rating",
            model.name.bold(),
            model.matches,
            model.accuracy
        );
        for bucket in &model.buckets {
            println!(
                "  Elo diff {:<10} {:>6} matches {:>7.2}%",
                bucket.label(),
                bucket.matches,
                bucket.accuracy
            );
        }
    }

    let betting = &report.betting;
    println!(
        "{} {} rated matches: Elo {:.2}%, favourite {:.2}%",
        "Betting:".bold(),
        betting.considered,
        betting.elo_accuracy(),
        betting.favorite_accuracy()
    );
    println!(
        "  Elo right, odds wrong: {}",
        betting.elo_right_odds_wrong.len().to_string().green()
    );
    println!(
        "  Odds right, Elo wrong: {}",
        betting.odds_right_elo_wrong.len().to_string().red()
    );
    println!("  Higher-rated fighter lost: {}", report.incorrect_predictions);
    Ok(())
}

pub fn handle_evaluate(input: &Path, variants: &[RatingVariant], configs: &[PathBuf]) -> Result<()> {
    let mut candidates = Vec::new();
    for path in configs {
        candidates.push((path.display().to_string(), RatingSettings::from_json_file(path)?));
    }

    let presets = if variants.is_empty() && configs.is_empty() {
        RatingVariant::value_variants().to_vec()
    } else {
        variants.to_vec()
    };
    for variant in presets {
        candidates.push((variant.name().to_string(), RatingSettings::for_variant(variant)));
    }

    let service = EvaluationService::new(candidates);
    let results = service.run(input)?;
    let best = best_trial(&results).map(|trial| trial.label.clone());

    for result in &results {
        let line = format!(
            "{:<30} final {:>6.2}%  pre-match {:>6.2}%  ({} rated, {} skipped)",
            result.label, result.final_accuracy, result.pre_match_accuracy, result.rated, result.skipped
        );
        if best.as_deref() == Some(result.label.as_str()) {
            println!("{}", line.green().bold());
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
