use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::settings::RatingVariant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Elo ratings for combat sports match logs")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Rate every match in a CSV log and write the annotated log
    Rate {
        /// Match log (R_fighter, B_fighter, date, Winner, win_type, Favorite)
        #[arg(short, long)]
        input: PathBuf,
        /// Annotated output CSV
        #[arg(short, long)]
        output: PathBuf,
        /// Built-in parameter set
        #[arg(long, value_enum, default_value_t = RatingVariant::Simple)]
        variant: RatingVariant,
        /// JSON rating settings, overrides --variant
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Also write final per-fighter ratings here
        #[arg(long)]
        ratings_output: Option<PathBuf>,
        /// Abort on a match whose winner is neither corner
        #[arg(long)]
        strict: bool,
    },
    /// Score annotated logs by Elo difference and against the betting favourite
    Compare {
        /// Annotated CSVs produced by `rate`
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Write matches Elo called correctly but the favourite did not
        #[arg(long)]
        elo_right_output: Option<PathBuf>,
        /// Write matches the favourite called correctly but Elo did not
        #[arg(long)]
        odds_right_output: Option<PathBuf>,
        /// Write matches the higher-rated fighter lost
        #[arg(long)]
        incorrect_output: Option<PathBuf>,
    },
    /// Run several parameter sets over one log and compare accuracy
    Evaluate {
        /// Match log
        #[arg(short, long)]
        input: PathBuf,
        /// Built-in parameter sets to try (defaults to all)
        #[arg(long, value_enum, value_delimiter = ',')]
        variants: Vec<RatingVariant>,
        /// JSON rating settings files to try
        #[arg(long, value_delimiter = ',')]
        configs: Vec<PathBuf>,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
