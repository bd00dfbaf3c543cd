use thiserror::Error;

/// Errors raised while loading or validating a [`crate::Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("paddle limits are inverted: min {min} > max {max}")]
    InvertedPaddleLimits { min: f32, max: f32 },

    #[error("paddle limits [{min}, {max}] leave the play area (half width {half_width})")]
    PaddleLimitsOutsideArea { min: f32, max: f32, half_width: f32 },

    #[error("score zones {south}/{north} must lie beyond the paddle lines at ±{paddle_z}")]
    ScoreZonesInsidePaddles { south: f32, north: f32, paddle_z: f32 },

    #[error("ball speeds are inconsistent: min {min}, base {base}, ceiling {ceiling}")]
    InconsistentBallSpeeds { min: f32, base: f32, ceiling: f32 },

    #[error("`max_score` must be at least 1")]
    ZeroMaxScore,

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`ai.replan_interval_ms` must be greater than zero")]
    ZeroReplanInterval,
}
