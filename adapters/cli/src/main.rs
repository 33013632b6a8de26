#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Market Warfare session in the terminal.

mod config;
mod console;
mod input;
mod render;
mod report;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use market_warfare_core::{Difficulty, SessionConfig};
use market_warfare_system_session::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::FileConfig, console::Console, report::SessionReport};

/// Survive a run of market shocks without losing your runway.
#[derive(Debug, Parser)]
#[command(name = "market-warfare", version, about)]
struct Args {
    /// Number of rounds to play.
    #[arg(long)]
    rounds: Option<u32>,
    /// Difficulty level: easy, normal or hard.
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Seed for the market pressure generator. Drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Let the built-in advisor pick every action.
    #[arg(long)]
    auto: bool,
    /// Cash on hand when the session opens.
    #[arg(long, allow_negative_numbers = true)]
    starting_cash: Option<i64>,
    /// TOML session file applied beneath command-line flags.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print a JSON report of the session to stdout.
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Layers defaults, the optional session file and flags, in that order.
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = SessionConfig::default();
        if let Some(path) = &self.config {
            config = FileConfig::load(path)?.layer_onto(config);
        }

        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(starting_cash) = self.starting_cash {
            config.starting_cash = starting_cash;
        }
        config.auto_play |= self.auto;

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Plays a full session and reports whether it ended in victory.
fn run(args: &Args) -> Result<bool> {
    let config = args.session_config()?;
    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random();
            info!(seed, "no seed configured, drew one");
            seed
        }
    };
    info!(
        difficulty = %config.difficulty,
        rounds = config.rounds,
        starting_cash = config.starting_cash,
        auto = config.auto_play,
        seed,
        "session starting"
    );

    let mut console = Console::new(
        transcript(args.json, config.auto_play),
        io::stdin().lock(),
        config.auto_play,
    );
    console.opening(&config, seed)?;

    let mut session = Session::seeded(&config, seed);
    let mut rounds = Vec::new();
    while let Some(report) = session.play_round_with(|context| console.choose(context))? {
        console.round_result(&report)?;
        rounds.push(report);
    }

    let outcome = session
        .outcome()
        .context("session stopped without reaching a verdict")?;
    console.finish(&outcome)?;
    info!(
        success = outcome.success,
        rounds_played = outcome.rounds_played,
        score = outcome.ledger.score,
        "session concluded"
    );

    if args.json {
        let report = SessionReport::new(&config, seed, rounds, outcome);
        println!("{}", report.to_json()?);
    }
    Ok(outcome.success)
}

/// Picks where the human-readable transcript goes.
///
/// With `--json` stdout is reserved for the report, so the transcript moves to
/// stderr while prompts are still needed and is dropped otherwise.
fn transcript(json: bool, auto_play: bool) -> Box<dyn Write> {
    match (json, auto_play) {
        (false, _) => Box::new(io::stdout()),
        (true, false) => Box::new(io::stderr()),
        (true, true) => Box::new(io::sink()),
    }
}
