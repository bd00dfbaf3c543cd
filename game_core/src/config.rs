use serde::{Deserialize, Serialize};

use crate::{ConfigError, Params, PlayerSlot};

/// Tuning knobs for the AI opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub replan_interval_ms: u64,
    pub reaction_delay_ms: u64,
    pub error_margin: f32,
    pub deadzone: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            replan_interval_ms: Params::AI_REPLAN_INTERVAL_MS,
            reaction_delay_ms: Params::AI_REACTION_DELAY_MS,
            error_margin: Params::AI_ERROR_MARGIN,
            deadzone: Params::AI_DEADZONE,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub play_area_width: f32,
    pub play_area_height: f32,
    pub ball_diameter: f32,
    pub ball_speed_base: f32,
    pub ball_speed_min: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increment: f32,
    pub ball_speed_ceiling_factor: f32,
    pub paddle_width: f32,
    pub paddle_depth: f32,
    pub paddle_speed: f32,
    pub paddle_min_x: f32,
    pub paddle_max_x: f32,
    pub paddle_z: f32,
    pub score_zone_north: f32,
    pub score_zone_south: f32,
    pub max_score: u8,
    pub ai: AiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            play_area_width: Params::PLAY_AREA_WIDTH,
            play_area_height: Params::PLAY_AREA_HEIGHT,
            ball_diameter: Params::BALL_DIAMETER,
            ball_speed_base: Params::BALL_SPEED_BASE,
            ball_speed_min: Params::BALL_SPEED_MIN,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increment: Params::BALL_SPEED_INCREMENT,
            ball_speed_ceiling_factor: Params::BALL_SPEED_CEILING_FACTOR,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_depth: Params::PADDLE_DEPTH,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_min_x: -Params::PADDLE_LIMIT,
            paddle_max_x: Params::PADDLE_LIMIT,
            paddle_z: Params::PADDLE_Z,
            score_zone_north: Params::SCORE_ZONE_NORTH,
            score_zone_south: Params::SCORE_ZONE_SOUTH,
            max_score: Params::MAX_SCORE,
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document; missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(src)?;
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejected configuration");
            return Err(e);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("play_area_width", self.play_area_width),
            ("play_area_height", self.play_area_height),
            ("ball_diameter", self.ball_diameter),
            ("ball_speed_base", self.ball_speed_base),
            ("ball_speed_min", self.ball_speed_min),
            ("ball_speed_max", self.ball_speed_max),
            ("ball_speed_increment", self.ball_speed_increment),
            ("ball_speed_ceiling_factor", self.ball_speed_ceiling_factor),
            ("paddle_width", self.paddle_width),
            ("paddle_depth", self.paddle_depth),
            ("paddle_speed", self.paddle_speed),
            ("paddle_min_x", self.paddle_min_x),
            ("paddle_max_x", self.paddle_max_x),
            ("paddle_z", self.paddle_z),
            ("score_zone_north", self.score_zone_north),
            ("score_zone_south", self.score_zone_south),
            ("ai.error_margin", self.ai.error_margin),
            ("ai.deadzone", self.ai.deadzone),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let positive = [
            ("play_area_width", self.play_area_width),
            ("play_area_height", self.play_area_height),
            ("ball_diameter", self.ball_diameter),
            ("ball_speed_base", self.ball_speed_base),
            ("ball_speed_min", self.ball_speed_min),
            ("ball_speed_max", self.ball_speed_max),
            ("ball_speed_ceiling_factor", self.ball_speed_ceiling_factor),
            ("paddle_width", self.paddle_width),
            ("paddle_depth", self.paddle_depth),
            ("paddle_speed", self.paddle_speed),
            ("paddle_z", self.paddle_z),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.paddle_min_x > self.paddle_max_x {
            return Err(ConfigError::InvertedPaddleLimits {
                min: self.paddle_min_x,
                max: self.paddle_max_x,
            });
        }
        let half_width = self.half_width();
        if self.paddle_min_x < -half_width || self.paddle_max_x > half_width {
            return Err(ConfigError::PaddleLimitsOutsideArea {
                min: self.paddle_min_x,
                max: self.paddle_max_x,
                half_width,
            });
        }

        if self.score_zone_north <= self.paddle_z || self.score_zone_south >= -self.paddle_z {
            return Err(ConfigError::ScoreZonesInsidePaddles {
                south: self.score_zone_south,
                north: self.score_zone_north,
                paddle_z: self.paddle_z,
            });
        }

        let ceiling = self.speed_ceiling();
        if self.ball_speed_min > self.ball_speed_base || self.ball_speed_base > ceiling {
            return Err(ConfigError::InconsistentBallSpeeds {
                min: self.ball_speed_min,
                base: self.ball_speed_base,
                ceiling,
            });
        }

        if self.max_score == 0 {
            return Err(ConfigError::ZeroMaxScore);
        }
        let non_negative = [
            ("ball_speed_increment", self.ball_speed_increment),
            ("ai.error_margin", self.ai.error_margin),
            ("ai.deadzone", self.ai.deadzone),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.ai.replan_interval_ms == 0 {
            return Err(ConfigError::ZeroReplanInterval);
        }

        Ok(())
    }

    pub fn half_width(&self) -> f32 {
        self.play_area_width / 2.0
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_diameter / 2.0
    }

    /// Lateral position at which the ball touches an east/west wall
    pub fn wall_limit(&self) -> f32 {
        self.half_width() - self.ball_radius()
    }

    /// Hard cap on ball speed
    pub fn speed_ceiling(&self) -> f32 {
        self.ball_speed_max * self.ball_speed_ceiling_factor
    }

    /// Depth (z) of a player's paddle line
    pub fn paddle_z(&self, slot: PlayerSlot) -> f32 {
        match slot {
            PlayerSlot::One => -self.paddle_z,
            PlayerSlot::Two => self.paddle_z,
        }
    }

    /// Clamp paddle X to its movement limits
    pub fn clamp_paddle_x(&self, x: f32) -> f32 {
        x.clamp(self.paddle_min_x, self.paddle_max_x)
    }
}
