//! "How hard are you trying?" escalation meter
//!
//! A leaky integrator fed by pointer closeness and press attempts. Crossing the
//! threshold fires a single escalation; only an explicit reset re-arms it.

use crate::error::ConfigError;
use crate::tuning::PressureTuning;

/// Below this the meter snaps to zero
const PRESSURE_EPSILON: f32 = 1e-6;
/// Linear bleed on top of the exponential decay, per second
const RESIDUAL_BLEED_PER_SEC: f32 = 0.006;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeterState {
    /// Accumulating, threshold not reached
    Building,
    /// Escalation fired; `cooldown` seconds remain before a reset is accepted
    Triggered { cooldown: f32 },
}

/// Emitted once when the threshold is crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterEvent {
    Escalated,
}

#[derive(Debug, Clone)]
pub struct PressureMeter {
    tuning: PressureTuning,
    value: f32,
    state: MeterState,
}

impl PressureMeter {
    pub fn new(tuning: PressureTuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            value: 0.0,
            state: MeterState::Building,
        })
    }

    /// Advance by `dt` seconds with the current pointer distance to the element
    pub fn update(&mut self, dt: f32, distance: Option<f32>) -> Option<MeterEvent> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.tuning.max_dt)
        } else {
            0.0
        };

        if self.value > PRESSURE_EPSILON {
            self.value *= self.tuning.decay_per_second.powf(dt);
            self.value = (self.value - RESIDUAL_BLEED_PER_SEC * dt).max(0.0);
        } else {
            self.value = 0.0;
        }

        if let Some(d) = distance.filter(|d| d.is_finite()) {
            if d < self.tuning.chase_radius {
                let closeness = 1.0 - d / self.tuning.chase_radius;
                self.value += closeness * self.tuning.chase_gain * dt;
            }
        }

        match self.state {
            MeterState::Triggered { cooldown } => {
                self.state = MeterState::Triggered {
                    cooldown: (cooldown - dt).max(0.0),
                };
                None
            }
            MeterState::Building if self.value >= self.tuning.trigger_at => {
                self.state = MeterState::Triggered {
                    cooldown: self.tuning.reset_cooldown,
                };
                log::info!("Pressure meter escalated at {:.2}", self.value);
                Some(MeterEvent::Escalated)
            }
            MeterState::Building => None,
        }
    }

    /// A discrete press attempt on the element
    pub fn press(&mut self) {
        self.value += self.tuning.press_bump;
    }

    /// Clear the accumulator and re-arm. Refused while the post-trigger
    /// cooldown is still running.
    pub fn reset(&mut self) -> bool {
        if let MeterState::Triggered { cooldown } = self.state {
            if cooldown > 0.0 {
                return false;
            }
        }
        self.value = 0.0;
        self.state = MeterState::Building;
        true
    }

    /// Warning level in [0, 1], ramping from `warn_from` up to the threshold
    pub fn heat(&self) -> f32 {
        let range = (self.tuning.trigger_at - self.tuning.warn_from).max(1e-4);
        ((self.value - self.tuning.warn_from) / range).clamp(0.0, 1.0)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn state(&self) -> MeterState {
        self.state
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self.state, MeterState::Triggered { .. })
    }
}
