use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::GameRng;

/// Which end of the board a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// South paddle (-Z)
    One,
    /// North paddle (+Z)
    Two,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Z direction the paddle face points toward (into the court)
    pub fn facing(self) -> f32 {
        match self {
            PlayerSlot::One => 1.0,
            PlayerSlot::Two => -1.0,
        }
    }
}

/// Paddle component - a player's box, sliding along X on a fixed Z line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub slot: PlayerSlot,
    pub x: f32,
    pub z: f32,
}

impl Paddle {
    pub fn new(slot: PlayerSlot, x: f32, z: f32) -> Self {
        Self { slot, x, z }
    }

    /// Position on the play plane as (x, z)
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}

/// Ball component
///
/// `pos`/`vel` live on the play plane: `.x` is lateral, `.y` is depth (the
/// scene's Z axis). Velocity is in units per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Reset ball to center and launch it at a random angle
    pub fn serve(&mut self, speed: f32, rng: &mut GameRng) {
        self.pos = Vec2::ZERO;
        let angle = serve_angle(rng);
        self.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
    }
}

/// Half-width in degrees of the cones around straight down-court (90°/270°)
/// that a serve never uses
pub const STRAIGHT_SERVE_EXCLUSION_DEG: f32 = 5.0;

/// Random launch angle in radians within 30°..150° or 210°..330°, outside
/// the straight down-court cones.
///
/// Both bands head toward a paddle, so launches running along the walls are
/// never produced. Draws landing in a cone are redrawn.
pub fn serve_angle(rng: &mut GameRng) -> f32 {
    let exclusion = STRAIGHT_SERVE_EXCLUSION_DEG.to_radians();
    loop {
        let degrees: f32 = if rng.0.gen_bool(0.5) {
            rng.0.gen_range(30.0..150.0)
        } else {
            rng.0.gen_range(210.0..330.0)
        };
        let angle = degrees.to_radians();
        let off_axis = (angle - FRAC_PI_2).abs().min((angle - 3.0 * FRAC_PI_2).abs());
        if off_axis > exclusion {
            return angle;
        }
    }
}

/// Movement intent for a paddle this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleIntent {
    #[default]
    None,
    /// Toward -X
    Left,
    /// Toward +X
    Right,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an intent from two held keys; both held cancel out
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => PaddleIntent::Left,
            (false, true) => PaddleIntent::Right,
            _ => PaddleIntent::None,
        }
    }

    pub fn dir(self) -> f32 {
        match self {
            PaddleIntent::None => 0.0,
            PaddleIntent::Left => -1.0,
            PaddleIntent::Right => 1.0,
        }
    }
}
