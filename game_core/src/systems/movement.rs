use glam::Vec2;

use crate::{Ball, Config, Paddle, PaddleIntent};

/// Apply one discrete paddle step and clamp to the movement limits
pub fn move_paddle(paddle: &mut Paddle, intent: PaddleIntent, config: &Config) {
    if intent != PaddleIntent::None {
        paddle.x += intent.dir() * config.paddle_speed;
    }
    // Clamp even when idle so a paddle placed out of range is pulled back
    paddle.x = config.clamp_paddle_x(paddle.x);
}

/// Where the ball would be after one full tick of travel
pub fn next_ball_pos(ball: &Ball) -> Vec2 {
    ball.pos + ball.vel
}
