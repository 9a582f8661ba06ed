//! Force terms blended by the per-frame update
//!
//! Each term is a pure function returning an acceleration (px/s²). The tick
//! decides how they are weighted.

use glam::Vec2;

use crate::consts::{
    IDLE_FREQ_X, IDLE_FREQ_Y, IDLE_SECONDARY_X, IDLE_SECONDARY_Y, LATERAL_FREQ,
};
use crate::tuning::Tuning;
use crate::{cap_length, smoothstep};

/// Flee urgency in [0, 1]: 1 inside `hard_radius`, 0 beyond `fear_radius`
#[inline]
pub fn flee_factor(distance: f32, hard_radius: f32, fear_radius: f32) -> f32 {
    (1.0 - smoothstep(hard_radius, fear_radius, distance)).clamp(0.0, 1.0)
}

/// Panic level: squared flee factor
#[inline]
pub fn panic_level(flee: f32) -> f32 {
    flee * flee
}

/// Idle drift target at time `t`: two harmonics per axis around `home`
pub fn idle_target(home: Vec2, amplitude: Vec2, t: f32, seed: f32) -> Vec2 {
    let x = (t * IDLE_FREQ_X[0] + seed).sin() * amplitude.x
        + (t * IDLE_FREQ_X[1] + seed * 1.9).sin() * (amplitude.x * IDLE_SECONDARY_X);
    let y = (t * IDLE_FREQ_Y[0] + seed * 1.3).cos() * amplitude.y
        + (t * IDLE_FREQ_Y[1] + seed * 0.7).sin() * (amplitude.y * IDLE_SECONDARY_Y);
    home + Vec2::new(x, y)
}

/// Largest offset the idle target can reach from home on each axis
pub fn idle_envelope(amplitude: Vec2) -> Vec2 {
    let a = amplitude.abs();
    Vec2::new(a.x * (1.0 + IDLE_SECONDARY_X), a.y * (1.0 + IDLE_SECONDARY_Y))
}

/// Damped spring toward the idle target, capped at `idle_max_accel`
pub fn idle_accel(tuning: &Tuning, position: Vec2, velocity: Vec2, target: Vec2) -> Vec2 {
    let accel = (target - position) * tuning.idle_spring - velocity * tuning.idle_damping;
    cap_length(accel, tuning.idle_max_accel)
}

/// Flight away from the pointer.
///
/// `away` is the unit vector from pointer to element centre. The along-axis
/// component is exactly `max_accel * panic`; a small perpendicular twist keeps
/// the path from being a straight line.
pub fn flee_accel(tuning: &Tuning, away: Vec2, panic: f32, t: f32, seed: f32) -> Vec2 {
    if panic <= 0.0 {
        return Vec2::ZERO;
    }
    let strength = tuning.max_accel * panic;
    let twist = (t * LATERAL_FREQ[0] + seed).sin() * 0.35
        + (t * LATERAL_FREQ[1] + seed * 0.6).cos() * 0.2;
    away * strength + away.perp() * (strength * tuning.lateral_jitter * twist)
}

/// Inward push near the container edges.
///
/// Ramps linearly from 0 at `edge_margin` inside an edge to `edge_push` at
/// the edge. `span` is the travel range of the top-left corner.
pub fn edge_accel(tuning: &Tuning, position: Vec2, span: Vec2) -> Vec2 {
    let ramp = |dist: f32| (1.0 - dist / tuning.edge_margin).clamp(0.0, 1.0);
    let x = ramp(position.x) - ramp(span.x - position.x);
    let y = ramp(position.y) - ramp(span.y - position.y);
    Vec2::new(x, y) * tuning.edge_push
}
