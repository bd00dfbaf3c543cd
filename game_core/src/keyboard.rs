//! Keyboard input handling

use std::collections::HashSet;

use crate::{PaddleIntent, PlayerSlot};

/// Keys moving a paddle toward (-X, +X) on the board.
///
/// Player 2 looks at the board from the far end, so their keys are mirrored:
/// `j` moves toward +X and `l` toward -X.
pub fn bindings(slot: PlayerSlot) -> (&'static str, &'static str) {
    match slot {
        PlayerSlot::One => ("a", "d"),
        PlayerSlot::Two => ("l", "j"),
    }
}

/// Currently held keys, fed from host key-down/key-up events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event
    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_lowercase());
    }

    /// Handle key up event
    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(&key.to_lowercase())
    }

    /// Release everything, e.g. when the canvas loses focus
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn intent(&self, slot: PlayerSlot) -> PaddleIntent {
        let (left, right) = bindings(slot);
        PaddleIntent::from_keys(self.is_held(left), self.is_held(right))
    }
}
