use hecs::World;

use super::{move_paddle, next_ball_pos, resolve_paddle_hit, resolve_wall, score_zone_scorer};
use crate::{Ball, Config, Events, Paddle, PaddleIntent, PlayerSlot};

/// What happened to the ball during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    WallBounce,
    PaddleHit(PlayerSlot),
    Scored(PlayerSlot),
}

/// Advance the ball and both paddles by one tick.
///
/// Order: paddle motion, tentative ball move, wall bounce (ends the tick),
/// paddle hits, then score zones. A paddle hit suppresses scoring for the
/// same tick.
pub fn advance(
    ball: &mut Ball,
    paddles: &mut [Paddle; 2],
    intents: [PaddleIntent; 2],
    config: &Config,
) -> Option<TickEvent> {
    for (paddle, intent) in paddles.iter_mut().zip(intents) {
        move_paddle(paddle, intent, config);
    }

    let next = next_ball_pos(ball);
    if resolve_wall(ball, next, config) {
        return Some(TickEvent::WallBounce);
    }
    ball.pos = next;

    for paddle in paddles.iter() {
        if resolve_paddle_hit(ball, paddle, config) {
            tracing::trace!(slot = ?paddle.slot, speed = ball.speed(), "paddle hit");
            return Some(TickEvent::PaddleHit(paddle.slot));
        }
    }

    score_zone_scorer(ball, config).map(TickEvent::Scored)
}

/// Run [`advance`] over the ball and paddle entities in `world`
pub fn physics_tick(world: &mut World, config: &Config, events: &mut Events) -> Option<TickEvent> {
    // First, collect ball and paddle data without holding borrows
    let mut ball = {
        let mut ball_query = world.query::<&Ball>();
        match ball_query.iter().next() {
            Some((_e, ball)) => *ball,
            None => return None, // No ball in world
        }
    };

    let mut slots: [Option<(Paddle, PaddleIntent)>; 2] = [None, None];
    for (_e, (paddle, intent)) in world.query::<(&Paddle, &PaddleIntent)>().iter() {
        slots[paddle.slot.index()] = Some((*paddle, *intent));
    }
    let [Some((p1, i1)), Some((p2, i2))] = slots else {
        return None; // Need both paddles
    };

    let mut paddles = [p1, p2];
    let event = advance(&mut ball, &mut paddles, [i1, i2], config);

    for (_e, b) in world.query_mut::<&mut Ball>() {
        *b = ball;
    }
    for (_e, paddle) in world.query_mut::<&mut Paddle>() {
        *paddle = paddles[paddle.slot.index()];
    }

    match event {
        Some(TickEvent::WallBounce) => events.ball_hit_wall = true,
        Some(TickEvent::PaddleHit(_)) => events.ball_hit_paddle = true,
        Some(TickEvent::Scored(_)) | None => {}
    }

    event
}
