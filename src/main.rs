use anyhow::Result;

use fight_elo::cli::Command;
use fight_elo::services::ComparisonExports;
use fight_elo::{handle_compare, handle_completions, handle_evaluate, handle_rate, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Rate {
            input,
            output,
            variant,
            config,
            ratings_output,
            strict,
        } => handle_rate(
            input,
            output,
            *variant,
            config.as_deref(),
            ratings_output.as_deref(),
            *strict,
        ),
        Command::Compare {
            inputs,
            elo_right_output,
            odds_right_output,
            incorrect_output,
        } => handle_compare(
            inputs,
            ComparisonExports {
                elo_right_odds_wrong: elo_right_output.clone(),
                odds_right_elo_wrong: odds_right_output.clone(),
                incorrect_predictions: incorrect_output.clone(),
            },
        ),
        Command::Evaluate {
            input,
            variants,
            configs,
        } => handle_evaluate(input, variants, configs),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
