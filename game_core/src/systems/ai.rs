use glam::Vec2;
use rand::Rng;

use crate::{AiConfig, Config, GameRng, PaddleIntent, Timer};

/// Directional keys the AI holds this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AiKeys {
    pub left: bool,
    pub right: bool,
}

impl AiKeys {
    pub fn intent(self) -> PaddleIntent {
        PaddleIntent::from_keys(self.left, self.right)
    }
}

/// Predict the X at which the ball will cross the paddle's Z line.
///
/// Wall bounces at `±half_width` are unrolled in closed form, however many
/// there are. A ball moving away from the paddle (or parallel to it) yields
/// the paddle's own X.
pub fn predict_landing_x(ball_pos: Vec2, ball_vel: Vec2, paddle_pos: Vec2, half_width: f32) -> f32 {
    let distance = paddle_pos.y - ball_pos.y;
    if ball_vel.y == 0.0 || distance * ball_vel.y <= 0.0 {
        return paddle_pos.x;
    }

    // No lateral motion, no wall ahead
    if ball_vel.x == 0.0 {
        return ball_pos.x.clamp(-half_width, half_width);
    }

    let time_to_reach = f64::from(distance) / f64::from(ball_vel.y);
    let unfolded = f64::from(ball_pos.x) + f64::from(ball_vel.x) * time_to_reach;
    if !unfolded.is_finite() {
        return ball_pos.x.clamp(-half_width, half_width);
    }

    let x = fold_into_court(unfolded, f64::from(half_width)) as f32;
    x.clamp(-half_width, half_width)
}

/// Map a position on the unrolled court back between the walls.
///
/// Reflecting at `±half_width` repeats every two court widths.
fn fold_into_court(x: f64, half_width: f64) -> f64 {
    if half_width <= 0.0 {
        return 0.0;
    }
    let period = 4.0 * half_width;
    let mut offset = (x + half_width).rem_euclid(period);
    if offset > 2.0 * half_width {
        offset = period - offset;
    }
    offset - half_width
}

/// Hold a key toward `target_x` unless already within the deadzone
pub fn steer(target_x: f32, current_x: f32, deadzone: f32) -> AiKeys {
    if target_x < current_x - deadzone {
        AiKeys {
            left: true,
            right: false,
        }
    } else if target_x > current_x + deadzone {
        AiKeys {
            left: false,
            right: true,
        }
    } else {
        AiKeys::default()
    }
}

/// AI opponent state, attached to the paddle it drives.
///
/// Two timescales: every tick it steers toward the adopted target; every
/// replan interval it predicts a new landing point, adds a random error, and
/// adopts that target only after the reaction delay has elapsed.
#[derive(Debug, Clone)]
pub struct AiController {
    config: AiConfig,
    half_width: f32,
    target_x: f32,
    pending_target_x: f32,
    replan: Timer,
    reaction: Timer,
    rng: GameRng,
}

impl AiController {
    pub fn new(config: &Config, now_ms: u64, rng: GameRng) -> Self {
        let mut replan = Timer::new();
        replan.schedule(now_ms, config.ai.replan_interval_ms);
        Self {
            config: config.ai.clone(),
            half_width: config.half_width(),
            target_x: 0.0,
            pending_target_x: 0.0,
            replan,
            reaction: Timer::new(),
            rng,
        }
    }

    /// Per-tick update; returns the keys to hold for this tick
    pub fn update(
        &mut self,
        ball_pos: Vec2,
        ball_vel: Vec2,
        paddle_pos: Vec2,
        now_ms: u64,
    ) -> AiKeys {
        if self.replan.fire(now_ms) {
            self.replan.schedule(now_ms, self.config.replan_interval_ms);
            self.plan(ball_pos, ball_vel, paddle_pos, now_ms);
        }

        if self.reaction.fire(now_ms) {
            self.target_x = self.pending_target_x;
            tracing::trace!(target_x = self.target_x, "ai adopted target");
        }

        steer(self.target_x, paddle_pos.x, self.config.deadzone)
    }

    fn plan(&mut self, ball_pos: Vec2, ball_vel: Vec2, paddle_pos: Vec2, now_ms: u64) {
        let predicted = predict_landing_x(ball_pos, ball_vel, paddle_pos, self.half_width);
        let margin = self.config.error_margin;
        let error = if margin > 0.0 {
            self.rng.0.gen_range(-margin..=margin)
        } else {
            0.0
        };

        self.pending_target_x = predicted + error;
        self.reaction.schedule(now_ms, self.config.reaction_delay_ms);
        tracing::trace!(predicted, error, now_ms, "ai replanned");
    }

    /// Target the paddle is currently steering toward
    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    /// Target waiting out the reaction delay, if any
    pub fn pending_target_x(&self) -> Option<f32> {
        self.reaction.is_pending().then_some(self.pending_target_x)
    }

    pub fn next_replan_ms(&self) -> Option<u64> {
        self.replan.due_ms()
    }

    /// Whether replanning is still scheduled
    pub fn is_active(&self) -> bool {
        self.replan.is_pending()
    }

    /// Cancel both timers; no replan or pending move will fire afterwards
    pub fn cancel_timers(&mut self) {
        self.replan.cancel();
        self.reaction.cancel();
    }

    /// Cancel pending work, recenter and restart the replan cadence
    pub fn reset(&mut self, now_ms: u64) {
        self.cancel_timers();
        self.target_x = 0.0;
        self.pending_target_x = 0.0;
        self.replan.schedule(now_ms, self.config.replan_interval_ms);
    }

    /// Delay both timers, e.g. by the time spent paused
    pub fn shift_timers(&mut self, by_ms: u64) {
        self.replan.shift(by_ms);
        self.reaction.shift(by_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_WIDTH: f32 = 5.0;

    fn controller(seed: u64) -> AiController {
        AiController::new(&Config::new(), 0, GameRng::new(seed))
    }

    #[test]
    fn test_straight_line_prediction_without_wall() {
        let ball_pos = Vec2::new(0.0, 6.0);
        let ball_vel = Vec2::new(0.1, 0.15);
        let paddle_pos = Vec2::new(0.0, 8.0);

        let x = predict_landing_x(ball_pos, ball_vel, paddle_pos, HALF_WIDTH);
        let expected = 0.1 * (2.0 / 0.15);
        assert!((x - expected).abs() < 1e-4, "Expected {expected}, got {x}");
    }

    #[test]
    fn test_prediction_unrolls_one_bounce() {
        let x = predict_landing_x(
            Vec2::new(4.0, 6.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.0, 8.0),
            HALF_WIDTH,
        );
        // 2 ticks to the east wall, 2 more back
        assert!((x - 4.0).abs() < 1e-4, "got {x}");
    }

    #[test]
    fn test_prediction_unrolls_many_bounces() {
        let x = predict_landing_x(
            Vec2::new(0.0, -8.0),
            Vec2::new(1.0, 0.1),
            Vec2::new(0.0, 8.0),
            HALF_WIDTH,
        );
        // 160 units of lateral travel folds back onto the center line
        assert!(x.abs() < 1e-2, "got {x}");
    }

    #[test]
    fn test_prediction_unrolls_eighty_bounces() {
        // 800 units of lateral travel: 80 reflections, whole periods
        let x = predict_landing_x(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.01),
            Vec2::new(0.0, 8.0),
            HALF_WIDTH,
        );
        assert!(x.abs() < 1e-2, "got {x}");

        let x = predict_landing_x(
            Vec2::new(1.5, 0.0),
            Vec2::new(-1.0, 0.01),
            Vec2::new(0.0, 8.0),
            HALF_WIDTH,
        );
        assert!((x - 1.5).abs() < 1e-2, "got {x}");
    }

    #[test]
    fn test_prediction_folds_half_period() {
        // 5 units out to the east wall, 5 back to the center
        let x = predict_landing_x(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.8),
            Vec2::new(0.0, 8.0),
            HALF_WIDTH,
        );
        assert!(x.abs() < 1e-3, "got {x}");

        // 15 units: out to the east wall, then all the way across to the west
        let x = predict_landing_x(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.5, 0.8),
            Vec2::new(0.0, 8.0),
            HALF_WIDTH,
        );
        assert!((x + HALF_WIDTH).abs() < 1e-3, "got {x}");
    }

    #[test]
    fn test_ball_moving_away_holds_position() {
        let x = predict_landing_x(
            Vec2::new(1.0, 0.0),
            Vec2::new(0.3, -0.2),
            Vec2::new(2.5, 8.0),
            HALF_WIDTH,
        );
        assert_eq!(x, 2.5);
    }

    #[test]
    fn test_zero_depth_velocity_holds_position() {
        let x = predict_landing_x(
            Vec2::new(1.0, 0.0),
            Vec2::new(0.3, 0.0),
            Vec2::new(-1.5, 8.0),
            HALF_WIDTH,
        );
        assert_eq!(x, -1.5);
    }

    #[test]
    fn test_zero_lateral_velocity_goes_straight() {
        let x = predict_landing_x(
            Vec2::new(1.25, 0.0),
            Vec2::new(0.0, 0.2),
            Vec2::new(0.0, 8.0),
            HALF_WIDTH,
        );
        assert_eq!(x, 1.25);
    }

    #[test]
    fn test_prediction_clamped_to_play_area() {
        let x = predict_landing_x(
            Vec2::new(7.0, 0.0),
            Vec2::new(0.0, 0.2),
            Vec2::new(0.0, 8.0),
            HALF_WIDTH,
        );
        assert_eq!(x, HALF_WIDTH);
    }

    #[test]
    fn test_prediction_works_for_south_paddle() {
        let x = predict_landing_x(
            Vec2::new(0.0, -6.0),
            Vec2::new(-0.1, -0.2),
            Vec2::new(0.0, -8.0),
            HALF_WIDTH,
        );
        assert!((x + 1.0).abs() < 1e-4, "got {x}");
    }

    #[test]
    fn test_steer_respects_deadzone() {
        assert_eq!(steer(0.04, 0.0, 0.05), AiKeys::default());
        assert_eq!(steer(-0.05, 0.0, 0.05), AiKeys::default());
        assert!(steer(0.2, 0.0, 0.05).right);
        assert!(steer(-0.2, 0.0, 0.05).left);
        assert_eq!(steer(-0.2, 0.0, 0.05).intent(), PaddleIntent::Left);
    }

    #[test]
    fn test_no_replan_before_interval() {
        let mut ai = controller(1);
        let keys = ai.update(Vec2::new(3.0, 0.0), Vec2::new(0.0, 0.2), Vec2::new(0.0, 8.0), 999);

        assert_eq!(ai.target_x(), 0.0);
        assert_eq!(ai.pending_target_x(), None);
        assert_eq!(keys, AiKeys::default());
    }

    #[test]
    fn test_target_adopted_after_reaction_delay() {
        let mut ai = controller(1);
        let ball_pos = Vec2::new(3.0, 0.0);
        let ball_vel = Vec2::new(0.0, 0.2);
        let paddle_pos = Vec2::new(0.0, 8.0);

        ai.update(ball_pos, ball_vel, paddle_pos, 1000);
        let pending = ai.pending_target_x().expect("replan should be pending");
        assert!((pending - 3.0).abs() <= 0.2 + 1e-6, "Error within margin");
        assert_eq!(ai.target_x(), 0.0, "Not adopted before the delay");

        ai.update(ball_pos, ball_vel, paddle_pos, 1099);
        assert_eq!(ai.target_x(), 0.0);

        let keys = ai.update(ball_pos, ball_vel, paddle_pos, 1100);
        assert_eq!(ai.target_x(), pending);
        assert!(keys.right, "Should steer toward the new target");
        assert_eq!(ai.next_replan_ms(), Some(2000));
    }

    #[test]
    fn test_same_seed_same_target() {
        let mut a = controller(42);
        let mut b = controller(42);
        let args = (Vec2::new(-1.0, 2.0), Vec2::new(0.13, 0.17), Vec2::new(0.5, 8.0));

        a.update(args.0, args.1, args.2, 1000);
        b.update(args.0, args.1, args.2, 1000);
        a.update(args.0, args.1, args.2, 1100);
        b.update(args.0, args.1, args.2, 1100);

        assert_eq!(a.target_x(), b.target_x());
    }

    #[test]
    fn test_reset_cancels_pending_move() {
        let mut ai = controller(3);
        let ball_vel = Vec2::new(0.0, 0.2);
        ai.update(Vec2::new(3.0, 0.0), ball_vel, Vec2::new(0.0, 8.0), 1000);
        assert!(ai.pending_target_x().is_some());

        ai.reset(1050);
        ai.update(Vec2::new(3.0, 0.0), ball_vel, Vec2::new(0.0, 8.0), 1200);

        assert_eq!(ai.target_x(), 0.0, "Stale plan must not be adopted");
        assert_eq!(ai.next_replan_ms(), Some(2050));
    }

    #[test]
    fn test_cancelled_controller_never_replans() {
        let mut ai = controller(3);
        ai.cancel_timers();
        assert!(!ai.is_active());

        ai.update(Vec2::new(3.0, 0.0), Vec2::new(0.0, 0.2), Vec2::new(0.0, 8.0), 5000);
        assert_eq!(ai.pending_target_x(), None);
        assert_eq!(ai.target_x(), 0.0);
    }

    #[test]
    fn test_shift_timers_delays_replan() {
        let mut ai = controller(3);
        ai.shift_timers(500);
        assert_eq!(ai.next_replan_ms(), Some(1500));

        ai.update(Vec2::new(3.0, 0.0), Vec2::new(0.0, 0.2), Vec2::new(0.0, 8.0), 1000);
        assert_eq!(ai.pending_target_x(), None);
    }
}
