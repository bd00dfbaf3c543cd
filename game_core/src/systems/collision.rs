use glam::Vec2;

use crate::{Ball, Config, Paddle};

/// Bounce off the east/west walls.
///
/// If `next` reaches a wall, X velocity is reflected and the ball is snapped
/// to the wall-adjusted boundary without any further travel this tick.
/// Returns true on a bounce.
pub fn resolve_wall(ball: &mut Ball, next: Vec2, config: &Config) -> bool {
    let limit = config.wall_limit();
    if next.x.abs() < limit {
        return false;
    }

    ball.vel.x = -ball.vel.x;
    ball.pos.x = next.x.signum() * limit;
    true
}

/// Whether the ball overlaps the paddle box while heading into it.
///
/// The depth window is the same for both paddles, measured along the
/// paddle's facing direction: from the back of the box to one ball radius
/// in front of its face.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, config: &Config) -> bool {
    let facing = paddle.slot.facing();
    let half_depth = config.paddle_depth / 2.0;
    let half_width = config.paddle_width / 2.0;

    let depth = facing * (ball.pos.y - paddle.z);
    let approaching = facing * ball.vel.y < 0.0;

    approaching
        && depth >= -half_depth
        && depth <= half_depth + config.ball_radius()
        && (ball.pos.x - paddle.x).abs() <= half_width
}

/// Send the ball back off a paddle.
///
/// The outgoing angle depends on where the ball struck: the center returns
/// it straight, the edges at up to 45°. Speed then grows by the configured
/// increment, capped at the speed ceiling.
pub fn deflect(ball: &mut Ball, paddle: &Paddle, config: &Config) {
    let half_width = config.paddle_width / 2.0;
    let current_speed = ball.speed();

    let reversed_z = -ball.vel.y;
    let hit_offset = ((ball.pos.x - paddle.x) / half_width).clamp(-1.0, 1.0);

    let vx = hit_offset * reversed_z.abs();
    // Radicand clamped: float error can push |vx| a hair past the speed
    let vz = reversed_z.signum() * (current_speed * current_speed - vx * vx).max(0.0).sqrt();
    ball.vel = Vec2::new(vx, vz);

    if current_speed > 0.0 {
        let new_speed =
            (current_speed * (1.0 + config.ball_speed_increment)).min(config.speed_ceiling());
        ball.vel *= new_speed / current_speed;
    }
}

/// Check one paddle and, on contact, snap the ball to its face and deflect.
/// Returns true on a hit.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle, config: &Config) -> bool {
    if !paddle_contact(ball, paddle, config) {
        return false;
    }

    // Snap to the face so the ball cannot stick inside the box
    let face_offset = config.paddle_depth / 2.0 + config.ball_radius();
    ball.pos.y = paddle.z + paddle.slot.facing() * face_offset;
    deflect(ball, paddle, config);
    true
}
