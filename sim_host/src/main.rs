//! Headless Pong host
//!
//! Drives matches frame by frame with the game core, AI against AI (or a
//! host-side bot in place of the human), and optionally writes the
//! postcard-encoded score updates and final reports to a file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use game_core::{Config, GameMode};
use tracing_subscriber::EnvFilter;

use crate::runner::{run_match, write_records, HostError, RunOptions};

mod runner;

#[derive(Parser)]
#[command(about, long_about = None)]
struct Cli {
    /// Number of matches to play back to back.
    #[arg(long, short, default_value = "1")]
    matches: u32,

    /// Seed for the first match; match `n` uses `seed + n`.
    #[arg(long, short, default_value = "12345")]
    seed: u64,

    /// Who drives player 2.
    #[arg(value_enum, long, default_value_t)]
    mode: Mode,

    /// TOML file overriding the default game settings.
    #[arg(long, short, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write postcard-encoded records to this file.
    #[arg(long, short, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Title stored in each match report.
    #[arg(long, default_value = "Pong")]
    title: String,

    /// Pace ticks against the wall clock instead of simulated time.
    #[arg(long)]
    realtime: bool,

    /// Give up on a match after this many ticks.
    #[arg(long, default_value = "200000")]
    max_ticks: u64,
}

#[derive(Copy, Clone, ValueEnum, Default)]
enum Mode {
    /// Player 2 is the built-in AI opponent
    #[default]
    Single,
    /// Both paddles take host input
    Multi,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Single => GameMode::Single,
            Mode::Multi => GameMode::Multi,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, HostError> {
    let Some(path) = path else {
        return Ok(Config::new());
    };
    let src = std::fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loading configuration");
    Ok(Config::from_toml_str(&src)?)
}

fn run(cli: Cli) -> Result<(), HostError> {
    let config = load_config(cli.config.as_ref())?;
    let mut records = Vec::new();
    let mut wins = [0u32; 2];

    for n in 0..cli.matches {
        let options = RunOptions {
            mode: cli.mode.into(),
            seed: cli.seed.wrapping_add(u64::from(n)),
            title: cli.title.clone(),
            realtime: cli.realtime,
            max_ticks: cli.max_ticks,
        };
        let outcome = run_match(&config, &options);
        if let Some(report) = &outcome.report {
            match report.winner {
                proto::Winner::Player1 => wins[0] += 1,
                proto::Winner::Player2 => wins[1] += 1,
            }
        }
        records.extend(outcome.records);
    }

    tracing::info!(
        matches = cli.matches,
        player1_wins = wins[0],
        player2_wins = wins[1],
        "all matches finished"
    );

    if let Some(path) = &cli.report {
        write_records(path, &records)?;
        tracing::info!(path = %path.display(), records = records.len(), "records written");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("pong-sim failed: {e}");
            ExitCode::FAILURE
        }
    }
}
