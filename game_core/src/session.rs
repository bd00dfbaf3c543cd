//! Simulation loop driver
//!
//! A [`Match`] owns one match's world (ball, both paddles, the AI state when
//! player 2 is AI driven), its score state and its clock. The host calls
//! [`Match::tick`] once per rendered frame and stops once the snapshot
//! reports game over; further ticks are harmless no-ops.

use hecs::World;

use crate::systems::{on_score_event, AiController};
use crate::{
    create_ai_paddle, create_ball, create_paddle, start_paddle, Ball, Clock, Config, Events,
    GameMode, GameRng, InputState, KeyboardState, MatchPhase, MatchSnapshot, MatchState, Paddle,
    PaddleIntent, PlayerSlot,
};

pub struct Match {
    world: World,
    config: Config,
    mode: GameMode,
    state: MatchState,
    events: Events,
    input: InputState,
    rng: GameRng,
    clock: Box<dyn Clock>,
    paused_at: Option<u64>,
    disposed: bool,
    ticks: u64,
}

impl Match {
    pub fn new(config: Config, mode: GameMode, seed: u64, clock: Box<dyn Clock>) -> Self {
        Self::with_scores(config, mode, seed, clock, 0, 0)
    }

    /// Start a match from persisted scores
    pub fn with_scores(
        config: Config,
        mode: GameMode,
        seed: u64,
        clock: Box<dyn Clock>,
        player1_score: u8,
        player2_score: u8,
    ) -> Self {
        let mut world = World::new();
        let mut rng = GameRng::new(seed);
        let now = clock.now_ms();

        create_paddle(&mut world, PlayerSlot::One, &config);
        match mode {
            GameMode::Single => {
                let controller = AiController::new(&config, now, rng.fork());
                create_ai_paddle(&mut world, PlayerSlot::Two, &config, controller);
            }
            GameMode::Multi => {
                create_paddle(&mut world, PlayerSlot::Two, &config);
            }
        }

        let mut ball = Ball::new(glam::Vec2::ZERO, glam::Vec2::ZERO);
        ball.serve(config.ball_speed_base, &mut rng);
        create_ball(&mut world, ball.pos, ball.vel);

        let state = MatchState::with_scores(player1_score, player2_score, config.max_score);
        tracing::info!(
            ?mode,
            seed,
            player1 = player1_score,
            player2 = player2_score,
            "match created"
        );

        Self {
            world,
            config,
            mode,
            state,
            events: Events::new(),
            input: InputState::new(),
            rng,
            clock,
            paused_at: None,
            disposed: false,
            ticks: 0,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) -> MatchSnapshot {
        if self.disposed || self.paused_at.is_some() {
            self.events.clear();
            return self.snapshot();
        }
        if !self.state.is_game_over() {
            self.ticks += 1;
        }

        let now = self.clock.now_ms();
        crate::step(
            &mut self.world,
            &self.config,
            &mut self.state,
            &mut self.events,
            &self.input,
            &mut self.rng,
            now,
        )
    }

    /// Human intent for a paddle; ignored for an AI-driven paddle
    pub fn set_input(&mut self, slot: PlayerSlot, intent: PaddleIntent) {
        self.input.set(slot, intent);
    }

    pub fn set_keyboard(&mut self, keys: &KeyboardState) {
        for slot in PlayerSlot::BOTH {
            self.input.set(slot, keys.intent(slot));
        }
    }

    /// Award a point outside the physics step
    pub fn award_point(&mut self, scorer: PlayerSlot) -> MatchSnapshot {
        if self.disposed {
            return self.snapshot();
        }
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            on_score_event(&mut self.state, ball, scorer, &self.config, &mut self.rng);
        }
        self.snapshot()
    }

    /// Scores to zero, ball re-served, paddles recentered, AI restarted
    pub fn reset_match(&mut self) -> MatchSnapshot {
        if self.disposed {
            tracing::warn!("reset requested on a disposed match");
            return self.snapshot();
        }

        let now = self.clock.now_ms();
        self.state.reset();
        self.events.clear();
        self.input.clear();
        self.paused_at = None;
        self.ticks = 0;

        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.serve(self.config.ball_speed_base, &mut self.rng);
        }
        let paddles = self.world.query_mut::<(&mut Paddle, &mut PaddleIntent)>();
        for (_entity, (paddle, intent)) in paddles {
            *paddle = start_paddle(paddle.slot, &self.config);
            *intent = PaddleIntent::None;
        }
        for (_entity, ai) in self.world.query_mut::<&mut AiController>() {
            ai.reset(now);
        }

        tracing::info!(mode = ?self.mode, "match reset");
        self.snapshot()
    }

    pub fn pause(&mut self) {
        if self.disposed || self.paused_at.is_some() {
            return;
        }
        self.paused_at = Some(self.clock.now_ms());
        tracing::debug!("match paused");
    }

    /// Resume play; AI timers are pushed back by the paused duration
    pub fn resume(&mut self) {
        let Some(paused_at) = self.paused_at.take() else {
            return;
        };
        let paused_for = self.clock.now_ms().saturating_sub(paused_at);
        for (_entity, ai) in self.world.query_mut::<&mut AiController>() {
            ai.shift_timers(paused_for);
        }
        tracing::debug!(paused_for, "match resumed");
    }

    /// Returns whether the match is now paused
    pub fn toggle_pause(&mut self) -> bool {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
        self.is_paused()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Tear down: AI timers cancelled, every later call is a no-op
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for (_entity, ai) in self.world.query_mut::<&mut AiController>() {
            ai.cancel_timers();
        }
        self.disposed = true;
        tracing::info!(ticks = self.ticks, "match disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase()
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        self.state.winner()
    }

    /// Events from the most recent tick
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ticks simulated since creation or the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
    }

    pub fn paddle(&self, slot: PlayerSlot) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, paddle)| paddle.slot == slot)
            .map(|(_e, paddle)| *paddle)
    }

    /// The AI's adopted target, in single-player mode
    pub fn ai_target_x(&self) -> Option<f32> {
        self.world
            .query::<&AiController>()
            .iter()
            .next()
            .map(|(_e, ai)| ai.target_x())
    }

    pub fn ai_is_active(&self) -> bool {
        self.world
            .query::<&AiController>()
            .iter()
            .any(|(_e, ai)| ai.is_active())
    }
}
