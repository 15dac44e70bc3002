//! drills: small console exercises.
//!
//! Usage:
//!   drills guess [--min N] [--max N] [--attempts N] [--seed N]
//!   drills sum
//!   drills average
//!   drills bubble [--data FILE] [--out FILE]

mod average;
mod chart;
mod config;
mod console;
mod guess;
mod logging;
mod sum;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drills_logic::bubble::{self, Dataset};
use drills_logic::config::DrillsConfig;
use drills_logic::guessing::GuessingGame;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "drills")]
#[command(about = "Number guessing, summing, time averaging and bubble charts", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "DRILLS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Guess a random number within a limited number of attempts
    Guess {
        /// Smallest possible number
        #[arg(long, allow_negative_numbers = true)]
        min: Option<i64>,
        /// Largest possible number
        #[arg(long, allow_negative_numbers = true)]
        max: Option<i64>,
        /// Number of guesses allowed
        #[arg(long)]
        attempts: Option<u32>,
        /// Seed for a reproducible target
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Add up numbers entered one per line
    Sum,
    /// Average times entered as SS, MM:SS or HH:MM:SS
    Average,
    /// Render a bubble chart to SVG
    Bubble {
        /// Dataset file (.toml or .json); the built-in sample when omitted
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,
        /// Output SVG path
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

/// Fold command-line overrides into the loaded config.
fn apply_overrides(config: &mut DrillsConfig, command: &Commands) {
    match command {
        Commands::Guess {
            min,
            max,
            attempts,
            seed,
        } => {
            if let Some(min) = min {
                config.guess.min = *min;
            }
            if let Some(max) = max {
                config.guess.max = *max;
            }
            if let Some(attempts) = attempts {
                config.guess.max_attempts = *attempts;
            }
            if seed.is_some() {
                config.guess.seed = *seed;
            }
        }
        Commands::Bubble { out: Some(out), .. } => {
            config.bubble.output = out.display().to_string();
        }
        _ => {}
    }
}

fn run_bubble<W: Write>(
    config: &DrillsConfig,
    data: Option<&PathBuf>,
    output: &mut W,
) -> Result<()> {
    let dataset: Dataset = match data {
        Some(path) => config::load_dataset(path)?,
        None => bubble::sample_dataset(),
    };
    let layout = bubble::layout(&dataset, config.bubble.max_radius)
        .context("Dataset cannot be charted")?;
    let out = PathBuf::from(&config.bubble.output);
    chart::render(&layout, &config.bubble, &out)?;
    writeln!(
        output,
        "Wrote {} bubbles to {}",
        layout.markers.len(),
        out.display()
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = config::load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli.command);
    config::ensure_valid(&config)?;
    debug!(?config, "effective config");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    match &cli.command {
        Commands::Guess { .. } => {
            let mut rng = config.guess.rng();
            let game = GuessingGame::new(&config.guess, &mut rng)?;
            info!(
                min = game.min(),
                max = game.max(),
                attempts = game.max_attempts(),
                "starting guessing game"
            );
            guess::play(game, &mut input, &mut output).context("Guessing game I/O failed")?;
        }
        Commands::Sum => {
            sum::run(&mut input, &mut output).context("Sum session I/O failed")?;
        }
        Commands::Average => {
            average::run(&mut input, &mut output).context("Average session I/O failed")?;
        }
        Commands::Bubble { data, .. } => run_bubble(&config, data.as_ref(), &mut output)?,
    }
    Ok(())
}
