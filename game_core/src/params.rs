/// Game tuning parameters for Pong
///
/// Distances are in play-area units, speeds in units per tick.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Play area
    pub const PLAY_AREA_WIDTH: f32 = 10.0;
    pub const PLAY_AREA_HEIGHT: f32 = 20.0;

    // Ball
    pub const BALL_DIAMETER: f32 = 0.5;
    pub const BALL_SPEED_BASE: f32 = 0.2; // Serve speed
    pub const BALL_SPEED_MIN: f32 = 0.15;
    pub const BALL_SPEED_MAX: f32 = 0.25; // Ceiling is MAX * BALL_SPEED_CEILING_FACTOR
    pub const BALL_SPEED_INCREMENT: f32 = 0.05; // +5% per paddle hit
    pub const BALL_SPEED_CEILING_FACTOR: f32 = 5.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 2.0;
    pub const PADDLE_DEPTH: f32 = 0.5;
    pub const PADDLE_SPEED: f32 = 0.1; // Per tick
    pub const PADDLE_LIMIT: f32 = 4.0; // |x| <= 4
    pub const PADDLE_Z: f32 = 8.0; // Player 1 at -Z, player 2 at +Z

    // Score zones
    pub const SCORE_ZONE_NORTH: f32 = 9.75;
    pub const SCORE_ZONE_SOUTH: f32 = -9.75;
    pub const MAX_SCORE: u8 = 3;

    // AI
    pub const AI_REPLAN_INTERVAL_MS: u64 = 1000;
    pub const AI_REACTION_DELAY_MS: u64 = 100;
    pub const AI_ERROR_MARGIN: f32 = 0.2;
    pub const AI_DEADZONE: f32 = 0.05;

    // Host frame pacing (~60 Hz)
    pub const FRAME_MS: u64 = 16;
}
