//! Configuration errors
//!
//! The simulation itself never fails once its tuning has been accepted, so
//! this is the only error type in the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("hard_radius ({hard}) must be below fear_radius ({fear})")]
    RadiiOrder { hard: f32, fear: f32 },

    #[error("{idle_name} ({idle}) must not exceed {max_name} ({max})")]
    IdleExceedsMax {
        idle_name: &'static str,
        idle: f32,
        max_name: &'static str,
        max: f32,
    },

    #[error("{name} must lie strictly between 0 and 1, got {value}")]
    NotUnitOpen { name: &'static str, value: f32 },

    #[error("{name} must lie in (0, 1], got {value}")]
    NotUnitHalfOpen { name: &'static str, value: f32 },

    #[error("{name} ({value}) must be below {limit_name} ({limit})")]
    NotBelow {
        name: &'static str,
        value: f32,
        limit_name: &'static str,
        limit: f32,
    },

    #[error("overrides must be a JSON object, got {kind}")]
    OverridesNotObject { kind: &'static str },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reject non-finite values
pub(crate) fn finite(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

/// Reject non-finite or non-positive values
pub(crate) fn positive(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
