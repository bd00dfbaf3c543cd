use serde::{Deserialize, Serialize};

use crate::{PaddleIntent, PlayerSlot};

/// Whether player 2 is a second human or the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Player 2 is AI controlled
    Single,
    /// Both paddles take local input
    Multi,
}

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Ball centered with a fresh launch, not yet advanced
    Serving,
    /// Ball moving
    InPlay,
    /// Someone reached the max score; state is frozen
    GameOver,
}

/// Result of awarding a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    /// Match already over, nothing changed
    Ignored,
    /// Point counted, ball must be re-served
    Serve,
    /// Point counted and ended the match
    GameOver { winner: PlayerSlot },
}

/// Read-only view of the match for the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub player1_score: u8,
    pub player2_score: u8,
    pub is_game_over: bool,
}

/// Score tracking and match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    player1_score: u8,
    player2_score: u8,
    phase: MatchPhase,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            player1_score: 0,
            player2_score: 0,
            phase: MatchPhase::Serving,
        }
    }

    /// Resume from persisted scores; already-decided scores start in GameOver
    pub fn with_scores(player1_score: u8, player2_score: u8, max_score: u8) -> Self {
        let phase = if player1_score >= max_score || player2_score >= max_score {
            MatchPhase::GameOver
        } else {
            MatchPhase::Serving
        };
        Self {
            player1_score,
            player2_score,
            phase,
        }
    }

    pub fn score(&self, slot: PlayerSlot) -> u8 {
        match slot {
            PlayerSlot::One => self.player1_score,
            PlayerSlot::Two => self.player2_score,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }

    /// Serving -> InPlay on the first tick after a serve
    pub fn begin_play(&mut self) {
        if self.phase == MatchPhase::Serving {
            self.phase = MatchPhase::InPlay;
        }
    }

    pub fn record_point(&mut self, scorer: PlayerSlot, max_score: u8) -> PointOutcome {
        if self.is_game_over() {
            return PointOutcome::Ignored;
        }

        match scorer {
            PlayerSlot::One => self.player1_score = self.player1_score.saturating_add(1),
            PlayerSlot::Two => self.player2_score = self.player2_score.saturating_add(1),
        }

        if self.player1_score >= max_score || self.player2_score >= max_score {
            self.phase = MatchPhase::GameOver;
            PointOutcome::GameOver { winner: scorer }
        } else {
            self.phase = MatchPhase::Serving;
            PointOutcome::Serve
        }
    }

    /// Player with the higher score once the match is over
    pub fn winner(&self) -> Option<PlayerSlot> {
        if !self.is_game_over() {
            return None;
        }
        match self.player1_score.cmp(&self.player2_score) {
            std::cmp::Ordering::Greater => Some(PlayerSlot::One),
            std::cmp::Ordering::Less => Some(PlayerSlot::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            player1_score: self.player1_score,
            player2_score: self.player2_score,
            is_game_over: self.is_game_over(),
        }
    }
}

/// Random number generator
#[derive(Debug, Clone)]
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Split off an independent generator, deterministic for a given seed
    pub fn fork(&mut self) -> Self {
        use rand::Rng;
        Self::new(self.0.gen())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    pub player1_scored: bool,
    pub player2_scored: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
    pub game_over: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn record_score(&mut self, scorer: PlayerSlot) {
        match scorer {
            PlayerSlot::One => self.player1_scored = true,
            PlayerSlot::Two => self.player2_scored = true,
        }
    }

    pub fn score_changed(&self) -> bool {
        self.player1_scored || self.player2_scored
    }
}

/// Host-supplied human intents for the current tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    intents: [PaddleIntent; 2],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: PlayerSlot, intent: PaddleIntent) {
        self.intents[slot.index()] = intent;
    }

    pub fn intent(&self, slot: PlayerSlot) -> PaddleIntent {
        self.intents[slot.index()]
    }

    pub fn clear(&mut self) {
        self.intents = [PaddleIntent::None; 2];
    }
}
