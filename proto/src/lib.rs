//! Records the host forwards to the persistence layer
//!
//! Uses postcard for efficient binary serialization

use game_core::{GameMode, MatchSnapshot, PlayerSlot};
use postcard::{from_bytes, to_allocvec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameType {
    Single,
    Multi,
}

impl From<GameMode> for GameType {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::Single => GameType::Single,
            GameMode::Multi => GameType::Multi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Winner {
    Player1,
    Player2,
}

impl From<PlayerSlot> for Winner {
    fn from(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => Winner::Player1,
            PlayerSlot::Two => Winner::Player2,
        }
    }
}

/// Final result of a finished match
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchReport {
    pub player1_score: u8,
    pub player2_score: u8,
    pub game_type: GameType,
    pub winner: Winner,
    pub game_title: String,
}

impl MatchReport {
    /// Build the report for a finished match.
    ///
    /// Returns `None` while the match is still running or when the scores
    /// name no winner.
    pub fn from_snapshot(
        snapshot: &MatchSnapshot,
        mode: GameMode,
        game_title: impl Into<String>,
    ) -> Option<Self> {
        if !snapshot.is_game_over {
            return None;
        }
        let winner = match snapshot.player1_score.cmp(&snapshot.player2_score) {
            std::cmp::Ordering::Greater => Winner::Player1,
            std::cmp::Ordering::Less => Winner::Player2,
            std::cmp::Ordering::Equal => return None,
        };

        Some(Self {
            player1_score: snapshot.player1_score,
            player2_score: snapshot.player2_score,
            game_type: mode.into(),
            winner,
            game_title: game_title.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HostRecord {
    /// Score update, sent whenever a point is awarded
    Snapshot { tick: u64, snapshot: MatchSnapshot },

    /// Final report, sent once on game over
    Report(MatchReport),
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl HostRecord {
    /// Serialize record to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize record from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}
