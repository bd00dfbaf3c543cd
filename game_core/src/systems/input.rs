use hecs::World;

use crate::systems::AiController;
use crate::{Ball, InputState, Paddle, PaddleIntent};

/// Set each paddle's intent for this tick: the AI controller's keys for an
/// AI-driven paddle, the host's input otherwise
pub fn gather_intents(world: &mut World, input: &InputState, now_ms: u64) {
    let ball_data = {
        let mut ball_query = world.query::<&Ball>();
        ball_query
            .iter()
            .next()
            .map(|(_e, ball)| (ball.pos, ball.vel))
    };

    for (_entity, (paddle, intent, ai)) in
        world.query_mut::<(&Paddle, &mut PaddleIntent, Option<&mut AiController>)>()
    {
        *intent = match (ai, ball_data) {
            (Some(ai), Some((ball_pos, ball_vel))) => {
                ai.update(ball_pos, ball_vel, paddle.pos(), now_ms).intent()
            }
            (Some(_), None) => PaddleIntent::None,
            (None, _) => input.intent(paddle.slot),
        };
    }
}
