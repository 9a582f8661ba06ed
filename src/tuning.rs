//! Data-driven motion balance
//!
//! Tunables are immutable per engine instance. They are validated once at
//! construction; nothing downstream re-checks them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, finite, positive};

/// Motion engine tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Pointer distance at which fleeing starts (px)
    pub fear_radius: f32,
    /// Pointer distance at which panic is total (px)
    pub hard_radius: f32,
    /// Speed cap at full panic (px/s)
    pub max_speed: f32,
    /// Flee acceleration at full panic (px/s²)
    pub max_accel: f32,
    /// Speed cap while calm (px/s)
    pub idle_max_speed: f32,
    /// Idle spring acceleration cap (px/s²)
    pub idle_max_accel: f32,
    /// Inward acceleration at a container edge (px/s²)
    pub edge_push: f32,
    /// Fraction of velocity left after one second of damping
    pub damping_per_second: f32,

    /// Perpendicular steering while fleeing, relative to the flee strength
    pub lateral_jitter: f32,
    /// Idle drift amplitude around home (px)
    pub idle_amplitude: Vec2,
    /// Idle spring stiffness (1/s²)
    pub idle_spring: f32,
    /// Idle spring velocity damping (1/s)
    pub idle_damping: f32,
    /// Width of the band along each edge where edge push ramps in (px)
    pub edge_margin: f32,
    /// Inset of the safe interior used by impulse and teleport (px)
    pub safe_margin: f32,
    /// Velocity added by an impulse nudge (px/s)
    pub impulse_strength: f32,
    /// Fraction of velocity kept when bouncing off an edge
    pub restitution: f32,
    /// Largest frame step the integrator accepts (s)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fear_radius: 260.0,
            hard_radius: 110.0,
            max_speed: 1500.0,
            max_accel: 5000.0,
            idle_max_speed: 90.0,
            idle_max_accel: 260.0,
            edge_push: 1500.0,
            damping_per_second: 0.006,

            lateral_jitter: 0.14,
            idle_amplitude: Vec2::new(26.0, 16.0),
            idle_spring: 10.0,
            idle_damping: 6.0,
            edge_margin: 50.0,
            safe_margin: 16.0,
            impulse_strength: 1500.0,
            restitution: 0.55,
            max_frame_dt: 1.0 / 30.0,
        }
    }
}

impl Tuning {
    /// Check every construction constraint, failing on the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fear = positive("fear_radius", self.fear_radius)?;
        let hard = positive("hard_radius", self.hard_radius)?;
        if hard >= fear {
            return Err(ConfigError::RadiiOrder { hard, fear });
        }

        let max_speed = positive("max_speed", self.max_speed)?;
        let max_accel = positive("max_accel", self.max_accel)?;
        let idle_speed = positive("idle_max_speed", self.idle_max_speed)?;
        let idle_accel = positive("idle_max_accel", self.idle_max_accel)?;
        if idle_speed > max_speed {
            return Err(ConfigError::IdleExceedsMax {
                idle_name: "idle_max_speed",
                idle: idle_speed,
                max_name: "max_speed",
                max: max_speed,
            });
        }
        if idle_accel > max_accel {
            return Err(ConfigError::IdleExceedsMax {
                idle_name: "idle_max_accel",
                idle: idle_accel,
                max_name: "max_accel",
                max: max_accel,
            });
        }

        positive("edge_push", self.edge_push)?;
        let damping = finite("damping_per_second", self.damping_per_second)?;
        if !(damping > 0.0 && damping < 1.0) {
            return Err(ConfigError::NotUnitOpen {
                name: "damping_per_second",
                value: damping,
            });
        }

        let jitter = finite("lateral_jitter", self.lateral_jitter)?;
        if jitter < 0.0 {
            return Err(ConfigError::Negative {
                name: "lateral_jitter",
                value: jitter,
            });
        }
        finite("idle_amplitude.x", self.idle_amplitude.x)?;
        finite("idle_amplitude.y", self.idle_amplitude.y)?;
        positive("idle_spring", self.idle_spring)?;
        positive("idle_damping", self.idle_damping)?;
        positive("edge_margin", self.edge_margin)?;
        positive("safe_margin", self.safe_margin)?;
        positive("impulse_strength", self.impulse_strength)?;
        let restitution = finite("restitution", self.restitution)?;
        if !(restitution > 0.0 && restitution <= 1.0) {
            return Err(ConfigError::NotUnitHalfOpen {
                name: "restitution",
                value: restitution,
            });
        }
        positive("max_frame_dt", self.max_frame_dt)?;
        Ok(())
    }

    /// Parse a JSON tuning document (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Speed cap blended by panic level
    #[inline]
    pub fn speed_cap(&self, panic: f32) -> f32 {
        self.idle_max_speed * (1.0 - panic) + self.max_speed * panic
    }
}

/// Escalation meter tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureTuning {
    /// Added per discrete press attempt
    pub press_bump: f32,
    /// Gain per second at full closeness
    pub chase_gain: f32,
    /// Fraction of pressure left after one second
    pub decay_per_second: f32,
    /// Pointer distance that counts as chasing (px)
    pub chase_radius: f32,
    /// Pressure that fires the escalation
    pub trigger_at: f32,
    /// Pressure where the warning heat starts ramping in
    pub warn_from: f32,
    /// Largest step the meter accepts (s)
    pub max_dt: f32,
    /// Seconds after triggering before a reset is honoured
    pub reset_cooldown: f32,
}

impl Default for PressureTuning {
    fn default() -> Self {
        Self {
            press_bump: 0.60,
            chase_gain: 0.80,
            decay_per_second: 0.98,
            chase_radius: 220.0,
            trigger_at: 3.0,
            warn_from: 0.05,
            max_dt: 0.05,
            reset_cooldown: 1.5,
        }
    }
}

impl PressureTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bump = finite("press_bump", self.press_bump)?;
        if bump < 0.0 {
            return Err(ConfigError::Negative {
                name: "press_bump",
                value: bump,
            });
        }
        positive("chase_gain", self.chase_gain)?;
        let decay = finite("decay_per_second", self.decay_per_second)?;
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(ConfigError::NotUnitHalfOpen {
                name: "decay_per_second",
                value: decay,
            });
        }
        positive("chase_radius", self.chase_radius)?;
        let trigger = positive("trigger_at", self.trigger_at)?;
        let warn = finite("warn_from", self.warn_from)?;
        if warn < 0.0 {
            return Err(ConfigError::Negative {
                name: "warn_from",
                value: warn,
            });
        }
        if warn >= trigger {
            return Err(ConfigError::NotBelow {
                name: "warn_from",
                value: warn,
                limit_name: "trigger_at",
                limit: trigger,
            });
        }
        positive("max_dt", self.max_dt)?;
        let cooldown = finite("reset_cooldown", self.reset_cooldown)?;
        if cooldown < 0.0 {
            return Err(ConfigError::Negative {
                name: "reset_cooldown",
                value: cooldown,
            });
        }
        Ok(())
    }
}
