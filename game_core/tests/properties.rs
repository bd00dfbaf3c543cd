use game_core::systems::deflect;
use game_core::*;
use glam::Vec2;
use proptest::prelude::*;

fn intent_strategy() -> impl Strategy<Value = PaddleIntent> {
    prop_oneof![
        Just(PaddleIntent::None),
        Just(PaddleIntent::Left),
        Just(PaddleIntent::Right),
    ]
}

fn in_band(degrees: f32) -> bool {
    (30.0..150.0).contains(&degrees) || (210.0..330.0).contains(&degrees)
}

fn near_straight(degrees: f32) -> bool {
    (85.0..=95.0).contains(&degrees) || (265.0..=275.0).contains(&degrees)
}

proptest! {
    #[test]
    fn serve_angle_stays_in_bands(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        for _ in 0..16 {
            let degrees = serve_angle(&mut rng).to_degrees();
            // to_degrees can land a hair outside an exact band edge
            prop_assert!(in_band(degrees) || in_band(degrees + 1e-3) || in_band(degrees - 1e-3),
                "angle {} outside serve bands", degrees);
            prop_assert!(!near_straight(degrees), "angle {} too close to straight", degrees);
        }
    }

    #[test]
    fn deflect_respects_ceiling_and_stays_finite(
        offset in -1.5f32..1.5,
        vx in -1.0f32..1.0,
        vz in 0.05f32..1.2,
    ) {
        let config = Config::new();
        let paddle = start_paddle(PlayerSlot::One, &config);
        let mut ball = Ball::new(Vec2::new(offset, paddle.z + 0.3), Vec2::new(vx, -vz));
        let before = ball.speed();

        deflect(&mut ball, &paddle, &config);

        prop_assert!(ball.vel.is_finite());
        prop_assert!(ball.vel.y >= 0.0, "Ball must head back north");
        let expected = (before * 1.05).min(config.speed_ceiling());
        prop_assert!((ball.speed() - expected).abs() < 1e-3,
            "expected {}, got {}", expected, ball.speed());
    }

    #[test]
    fn prediction_stays_on_court(
        x in -4.75f32..4.75,
        z in -9.0f32..9.0,
        vx in -1.25f32..1.25,
        vz in -1.25f32..1.25,
        paddle_x in -4.0f32..4.0,
    ) {
        let config = Config::new();
        let half_width = config.half_width();
        let paddle = Vec2::new(paddle_x, config.paddle_z(PlayerSlot::Two));

        let first = predict_landing_x(Vec2::new(x, z), Vec2::new(vx, vz), paddle, half_width);
        let second = predict_landing_x(Vec2::new(x, z), Vec2::new(vx, vz), paddle, half_width);

        prop_assert!(first.is_finite());
        prop_assert!(first.abs() <= half_width + 1e-4);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ai_is_deterministic_for_a_seed(seed in any::<u64>()) {
        let config = Config::new();
        let mut a = AiController::new(&config, 0, GameRng::new(seed));
        let mut b = AiController::new(&config, 0, GameRng::new(seed));
        let ball_pos = Vec2::new(1.0, 2.0);
        let ball_vel = Vec2::new(0.12, 0.15);
        let paddle = Vec2::new(0.0, config.paddle_z(PlayerSlot::Two));

        for now in (0..5_000).step_by(16) {
            prop_assert_eq!(
                a.update(ball_pos, ball_vel, paddle, now),
                b.update(ball_pos, ball_vel, paddle, now)
            );
            prop_assert_eq!(a.target_x(), b.target_x());
        }
    }

    #[test]
    fn random_play_keeps_match_invariants(
        seed in any::<u64>(),
        intents in proptest::collection::vec((intent_strategy(), intent_strategy()), 1..400),
    ) {
        let config = Config::new();
        let clock = ManualClock::new(0);
        let mut game = Match::new(config.clone(), GameMode::Multi, seed, Box::new(clock.clone()));
        let mut last = game.snapshot();

        for _ in 0..4 {
            for (one, two) in &intents {
                game.set_input(PlayerSlot::One, *one);
                game.set_input(PlayerSlot::Two, *two);
                clock.advance(Params::FRAME_MS);
                let snapshot = game.tick();

                let ball = game.ball().unwrap();
                prop_assert!(ball.speed() <= config.speed_ceiling() + 1e-4);
                prop_assert!(ball.pos.x.abs() <= config.wall_limit() + 1e-4);
                for slot in PlayerSlot::BOTH {
                    let x = game.paddle(slot).unwrap().x;
                    prop_assert!(x >= config.paddle_min_x && x <= config.paddle_max_x);
                }

                prop_assert!(snapshot.player1_score >= last.player1_score);
                prop_assert!(snapshot.player2_score >= last.player2_score);
                prop_assert!(snapshot.player1_score <= config.max_score);
                prop_assert!(snapshot.player2_score <= config.max_score);
                prop_assert_eq!(
                    snapshot.is_game_over,
                    snapshot.player1_score >= config.max_score
                        || snapshot.player2_score >= config.max_score
                );
                if last.is_game_over {
                    prop_assert_eq!(snapshot, last);
                }
                last = snapshot;
            }
        }
    }
}
