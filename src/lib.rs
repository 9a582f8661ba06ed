//! Runaway Button - an evasive UI element that flees the pointer
//!
//! Core modules:
//! - `sim`: Deterministic motion engine (forces, integration, commands)
//! - `tuning`: Data-driven motion parameters and validation
//! - `settings`: User preferences (preset, reduced motion, debug overlay)
//! - `debug`: Debug overlay draw list built from frame diagnostics
//! - `clock`: Frame clock and multi-engine scene driver
//! - `web`: wasm-bindgen wrapper for the browser (wasm32 only)

pub mod clock;
pub mod debug;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{FrameClock, Scene};
pub use debug::DebugOverlay;
pub use error::ConfigError;
pub use settings::{MotionPreset, Settings};
pub use sim::{Diagnostics, FrameOutput, MotionEngine, PointerSample, PressureMeter};
pub use tuning::{PressureTuning, Tuning};

use glam::Vec2;

/// Engine constants that are not exposed as tunables
pub mod consts {
    /// Home offset to the right of the companion "accept" target centre
    pub const ANCHOR_OFFSET_X: f32 = 140.0;
    /// Home as a fraction of the container when there is no anchor
    pub const HOME_FRACTION_X: f32 = 0.62;
    pub const HOME_FRACTION_Y: f32 = 0.55;

    /// Idle drift frequencies (rad/s)
    pub const IDLE_FREQ_X: [f32; 2] = [0.9, 1.7];
    pub const IDLE_FREQ_Y: [f32; 2] = [1.05, 2.2];
    /// Secondary harmonic weights relative to the idle amplitude
    pub const IDLE_SECONDARY_X: f32 = 0.35;
    pub const IDLE_SECONDARY_Y: f32 = 0.25;

    /// Lateral twist frequencies for flee steering
    pub const LATERAL_FREQ: [f32; 2] = [4.2, 3.1];

    /// Common period of every idle and twist frequency (40π s). Each
    /// frequency times 20 is a whole number.
    pub const DRIFT_PERIOD: f32 = 40.0 * std::f32::consts::PI;

    /// Seed phase range, drawn once per engine
    pub const SEED_RANGE: f32 = 1000.0;

    /// Fallback direction for zero-length vectors
    pub const FALLBACK_DIR: glam::Vec2 = glam::Vec2::X;
}

/// Cubic Hermite ease between two edges, clamped to [0, 1]
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Unit vector, or the fixed fallback direction when `v` has no usable length
#[inline]
pub fn normalize_or_fallback(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(consts::FALLBACK_DIR)
}

/// Clamp the magnitude of `v` to `max`
#[inline]
pub fn cap_length(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max && len > 0.0 {
        v * (max / len)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(110.0, 260.0, 50.0), 0.0);
        assert_eq!(smoothstep(110.0, 260.0, 110.0), 0.0);
        assert_eq!(smoothstep(110.0, 260.0, 260.0), 1.0);
        assert_eq!(smoothstep(110.0, 260.0, 900.0), 1.0);
        assert!((smoothstep(110.0, 260.0, 185.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_fallback_on_zero() {
        assert_eq!(normalize_or_fallback(Vec2::ZERO), Vec2::X);
        assert_eq!(normalize_or_fallback(Vec2::new(f32::NAN, 1.0)), Vec2::X);
        let n = normalize_or_fallback(Vec2::new(0.0, -3.0));
        assert!((n - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_cap_length() {
        let v = cap_length(Vec2::new(30.0, 40.0), 10.0);
        assert!((v.length() - 10.0).abs() < 1e-4);
        assert_eq!(cap_length(Vec2::new(3.0, 4.0), 10.0), Vec2::new(3.0, 4.0));
    }
}
