//! Per-frame motion update
//!
//! Advances one [`SimulationState`] by one display frame. Given the same state,
//! tuning, step and pointer it always produces the same result.

use glam::Vec2;

use super::forces::{edge_accel, flee_accel, flee_factor, idle_accel, idle_target, panic_level};
use super::state::SimulationState;
use crate::normalize_or_fallback;
use crate::tuning::Tuning;

/// Readings from one update, for debugging and overlays
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Diagnostics {
    /// Pointer to element-centre distance; `None` without a pointer
    pub distance: Option<f32>,
    pub flee: f32,
    pub panic: f32,
    /// Speed after the update (px/s)
    pub speed: f32,
    /// Speed cap for this frame's panic level
    pub cap: f32,
    /// Total acceleration applied this frame
    pub accel: Vec2,
    pub idle_accel: Vec2,
    pub flee_accel: Vec2,
    pub edge_accel: Vec2,
    /// False for no-op frames (bad step, degenerate geometry, reduced motion)
    pub integrated: bool,
}

/// Advance `state` by `dt` seconds.
///
/// `pointer` is container-local. Steps that are zero, negative or non-finite
/// leave the state untouched; longer steps are cut to `max_frame_dt`.
pub fn step(
    state: &mut SimulationState,
    tuning: &Tuning,
    dt: f32,
    pointer: Option<Vec2>,
) -> Diagnostics {
    if !(dt.is_finite() && dt > 0.0) || state.geometry.is_degenerate() {
        return hold(state, tuning, pointer);
    }
    let mut diag = measure(state, tuning, pointer);
    let dt = dt.min(tuning.max_frame_dt);

    state.elapsed += f64::from(dt);
    let t = state.drift_phase();
    let panic = diag.panic;

    let away = match pointer {
        Some(p) => normalize_or_fallback(state.center() - p),
        None => Vec2::ZERO,
    };

    let target = idle_target(state.home, tuning.idle_amplitude, t, state.seed);
    let idle = idle_accel(tuning, state.position, state.velocity, target) * (1.0 - panic);
    let flee = flee_accel(tuning, away, panic, t, state.seed);
    let span = state.geometry.span();
    let edge = edge_accel(tuning, state.position, span);
    let accel = idle + flee + edge;

    // Integrate velocity, damp, cap, then move
    let mut vel = state.velocity + accel * dt;
    vel *= tuning.damping_per_second.powf(dt);
    vel = crate::cap_length(vel, diag.cap);
    let mut pos = state.position + vel * dt;

    // Clamp with a soft bounce
    if pos.x < 0.0 {
        pos.x = 0.0;
        vel.x = vel.x.abs() * tuning.restitution;
    } else if pos.x > span.x {
        pos.x = span.x;
        vel.x = -vel.x.abs() * tuning.restitution;
    }
    if pos.y < 0.0 {
        pos.y = 0.0;
        vel.y = vel.y.abs() * tuning.restitution;
    } else if pos.y > span.y {
        pos.y = span.y;
        vel.y = -vel.y.abs() * tuning.restitution;
    }

    state.position = pos;
    state.velocity = vel;

    diag.speed = vel.length();
    diag.accel = accel;
    diag.idle_accel = idle;
    diag.flee_accel = flee;
    diag.edge_accel = edge;
    diag.integrated = true;
    diag
}

/// Update that does not integrate: position and clock stay put, velocity is
/// capped for the current panic level
pub fn hold(state: &mut SimulationState, tuning: &Tuning, pointer: Option<Vec2>) -> Diagnostics {
    let mut diag = measure(state, tuning, pointer);
    state.velocity = crate::cap_length(state.velocity, diag.cap);
    diag.speed = state.velocity.length();
    diag
}

/// Readings for the current state without moving it
pub fn measure(state: &SimulationState, tuning: &Tuning, pointer: Option<Vec2>) -> Diagnostics {
    let distance = pointer.map(|p| state.center().distance(p));
    let flee = distance.map_or(0.0, |d| flee_factor(d, tuning.hard_radius, tuning.fear_radius));
    let panic = panic_level(flee);
    Diagnostics {
        distance,
        flee,
        panic,
        speed: state.velocity.length(),
        cap: tuning.speed_cap(panic),
        ..Default::default()
    }
}
