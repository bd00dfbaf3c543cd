use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use game_core::{
    AiController, Clock, Config, ConfigError, GameMode, GameRng, ManualClock, Match,
    MatchSnapshot, MonotonicClock, Params, PlayerSlot,
};
use proto::{HostRecord, MatchReport};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode record: {0}")]
    Encode(#[from] postcard::Error),
}

pub struct RunOptions {
    pub mode: GameMode,
    pub seed: u64,
    pub title: String,
    pub realtime: bool,
    pub max_ticks: u64,
}

pub struct MatchOutcome {
    pub snapshot: MatchSnapshot,
    pub ticks: u64,
    pub report: Option<MatchReport>,
    pub records: Vec<HostRecord>,
}

/// Frame pacing: simulated time steps instantly, real time sleeps
enum HostClock {
    Simulated(ManualClock),
    Realtime(MonotonicClock),
}

impl HostClock {
    fn new(realtime: bool) -> Self {
        if realtime {
            HostClock::Realtime(MonotonicClock::new())
        } else {
            HostClock::Simulated(ManualClock::new(0))
        }
    }

    /// Handle for the match; shares time with this one
    fn boxed(&self) -> Box<dyn Clock> {
        match self {
            HostClock::Simulated(clock) => Box::new(clock.clone()),
            HostClock::Realtime(clock) => Box::new(*clock),
        }
    }

    fn now_ms(&self) -> u64 {
        match self {
            HostClock::Simulated(clock) => clock.now_ms(),
            HostClock::Realtime(clock) => clock.now_ms(),
        }
    }

    fn wait_frame(&self) {
        match self {
            HostClock::Simulated(clock) => clock.advance(Params::FRAME_MS),
            HostClock::Realtime(_) => std::thread::sleep(Duration::from_millis(Params::FRAME_MS)),
        }
    }
}

/// Paddles the host drives in place of a human
fn host_slots(mode: GameMode) -> &'static [PlayerSlot] {
    match mode {
        GameMode::Single => &[PlayerSlot::One],
        GameMode::Multi => &PlayerSlot::BOTH,
    }
}

/// Play one match to completion (or until `max_ticks`).
pub fn run_match(config: &Config, options: &RunOptions) -> MatchOutcome {
    let clock = HostClock::new(options.realtime);
    let mut game = Match::new(config.clone(), options.mode, options.seed, clock.boxed());

    // Host bots get their own stream so the match RNG stays untouched
    let mut bot_rng = GameRng::new(options.seed.rotate_left(32));
    let mut bots: Vec<(PlayerSlot, AiController)> = host_slots(game.mode())
        .iter()
        .map(|&slot| {
            let bot = AiController::new(game.config(), clock.now_ms(), bot_rng.fork());
            (slot, bot)
        })
        .collect();
    tracing::debug!(
        seed = options.seed,
        max_score = game.config().max_score,
        bots = bots.len(),
        "match started"
    );

    let mut records = Vec::new();
    let mut snapshot = game.snapshot();

    while !snapshot.is_game_over {
        if game.ticks() >= options.max_ticks {
            tracing::warn!(
                seed = options.seed,
                ticks = game.ticks(),
                "tick limit reached before game over"
            );
            break;
        }

        if let Some(ball) = game.ball() {
            let now = clock.now_ms();
            for (slot, bot) in bots.iter_mut() {
                if let Some(paddle) = game.paddle(*slot) {
                    let keys = bot.update(ball.pos, ball.vel, paddle.pos(), now);
                    game.set_input(*slot, keys.intent());
                }
            }
        }

        clock.wait_frame();
        snapshot = game.tick();

        if game.events().score_changed() {
            tracing::info!(
                tick = game.ticks(),
                player1 = snapshot.player1_score,
                player2 = snapshot.player2_score,
                "score update"
            );
            records.push(HostRecord::Snapshot {
                tick: game.ticks(),
                snapshot,
            });
        }
    }

    let report = MatchReport::from_snapshot(&snapshot, game.mode(), options.title.as_str());
    if let Some(report) = &report {
        tracing::info!(
            seed = options.seed,
            ticks = game.ticks(),
            winner = ?report.winner,
            player1 = report.player1_score,
            player2 = report.player2_score,
            "match finished"
        );
        records.push(HostRecord::Report(report.clone()));
    }

    let ticks = game.ticks();
    game.dispose();

    MatchOutcome {
        snapshot,
        ticks,
        report,
        records,
    }
}

/// Write records as a sequence of length-prefixed postcard frames
pub fn write_records(path: &Path, records: &[HostRecord]) -> Result<(), HostError> {
    let io_err = |source| HostError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(io_err)?;
    for record in records {
        let bytes = record.to_bytes()?;
        let len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
        file.write_all(&len.to_le_bytes()).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
    }
    file.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(mode: GameMode, seed: u64) -> RunOptions {
        RunOptions {
            mode,
            seed,
            title: "Test".to_string(),
            realtime: false,
            max_ticks: 500_000,
        }
    }

    #[test]
    fn test_same_seed_same_match() {
        let config = Config::new();
        let a = run_match(&config, &options(GameMode::Single, 7));
        let b = run_match(&config, &options(GameMode::Single, 7));
        assert_eq!(a.snapshot, b.snapshot);
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_tick_limit_stops_without_report() {
        let config = Config::new();
        let mut opts = options(GameMode::Multi, 3);
        opts.max_ticks = 10;
        let outcome = run_match(&config, &opts);
        assert_eq!(outcome.ticks, 10);
        assert!(!outcome.snapshot.is_game_over);
        assert!(outcome.report.is_none());
    }

    #[test]
    fn test_records_written_with_length_prefix() {
        let record = HostRecord::Snapshot {
            tick: 1,
            snapshot: MatchSnapshot::default(),
        };
        let path = std::env::temp_dir().join(format!("pong-sim-test-{}.bin", std::process::id()));
        write_records(&path, std::slice::from_ref(&record)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let len = u32::from_le_bytes(bytes[..4].try_into().unwrap()) as usize;
        assert_eq!(bytes.len(), 4 + len);
        assert_eq!(HostRecord::from_bytes(&bytes[4..]).unwrap(), record);
    }
}
