use crate::{Ball, Config, GameRng, MatchSnapshot, MatchState, PlayerSlot, PointOutcome};

/// Which player, if any, the ball's depth awards a point to
pub fn score_zone_scorer(ball: &Ball, config: &Config) -> Option<PlayerSlot> {
    if ball.pos.y >= config.score_zone_north {
        // Past player 2's line
        Some(PlayerSlot::One)
    } else if ball.pos.y <= config.score_zone_south {
        Some(PlayerSlot::Two)
    } else {
        None
    }
}

/// Award a point and either re-serve or end the match.
///
/// Paddles are left where they are; only a full match reset moves them.
pub fn on_score_event(
    state: &mut MatchState,
    ball: &mut Ball,
    scorer: PlayerSlot,
    config: &Config,
    rng: &mut GameRng,
) -> MatchSnapshot {
    match state.record_point(scorer, config.max_score) {
        PointOutcome::Ignored => {
            tracing::debug!(?scorer, "point ignored, match already over");
        }
        PointOutcome::Serve => {
            ball.serve(config.ball_speed_base, rng);
            let snapshot = state.snapshot();
            tracing::info!(
                ?scorer,
                player1 = snapshot.player1_score,
                player2 = snapshot.player2_score,
                "point scored"
            );
            tracing::debug!(vx = ball.vel.x, vz = ball.vel.y, "ball served");
        }
        PointOutcome::GameOver { winner } => {
            let snapshot = state.snapshot();
            tracing::info!(
                ?winner,
                player1 = snapshot.player1_score,
                player2 = snapshot.player2_score,
                "game over"
            );
        }
    }
    state.snapshot()
}
