pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod params;
pub mod resources;
pub mod session;
pub mod systems;
pub mod timer;

pub use clock::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use keyboard::*;
pub use params::*;
pub use resources::*;
pub use session::*;
pub use systems::{advance, predict_landing_x, AiController, AiKeys, TickEvent};
pub use timer::*;

use hecs::World;
use systems::*;

/// Run one deterministic Pong tick.
///
/// Once the match is over this is a no-op returning the frozen snapshot.
pub fn step(
    world: &mut World,
    config: &Config,
    state: &mut MatchState,
    events: &mut Events,
    input: &InputState,
    rng: &mut GameRng,
    now_ms: u64,
) -> MatchSnapshot {
    // Clear events at start of tick
    events.clear();

    if state.is_game_over() {
        return state.snapshot();
    }
    state.begin_play();

    // 1. Paddle intents (host input or AI)
    gather_intents(world, input, now_ms);

    // 2. Move paddles and ball, resolve walls and paddles, check score zones
    if let Some(TickEvent::Scored(scorer)) = physics_tick(world, config, events) {
        // 3. Award the point, re-serve or end the match
        events.record_score(scorer);
        for (_entity, ball) in world.query_mut::<&mut Ball>() {
            on_score_event(state, ball, scorer, config, rng);
        }
        events.game_over = state.is_game_over();
    }

    state.snapshot()
}

/// Helper to create a human-driven paddle entity at its start position
pub fn create_paddle(world: &mut World, slot: PlayerSlot, config: &Config) -> hecs::Entity {
    world.spawn((start_paddle(slot, config), PaddleIntent::new()))
}

/// Helper to create a paddle entity driven by `controller`
pub fn create_ai_paddle(
    world: &mut World,
    slot: PlayerSlot,
    config: &Config,
    controller: AiController,
) -> hecs::Entity {
    world.spawn((start_paddle(slot, config), PaddleIntent::new(), controller))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}

/// Paddle centered on its line
pub fn start_paddle(slot: PlayerSlot, config: &Config) -> Paddle {
    Paddle::new(slot, config.clamp_paddle_x(0.0), config.paddle_z(slot))
}
