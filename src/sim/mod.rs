//! Deterministic motion simulation
//!
//! All avoidance logic lives here. This module must stay pure:
//! - Explicit `dt`, clamped per frame
//! - Seeded or injected RNG only
//! - No rendering, DOM or platform dependencies

pub mod engine;
pub mod forces;
pub mod pressure;
pub mod state;
pub mod tick;

pub use engine::{FrameOutput, MotionEngine, Placement, TELEPORT_TRANSITION_MS};
pub use forces::{edge_accel, flee_accel, flee_factor, idle_accel, idle_envelope, idle_target, panic_level};
pub use pressure::{MeterEvent, MeterState, PressureMeter};
pub use state::{Geometry, PointerSample, SimulationState};
pub use tick::{Diagnostics, hold, measure, step};
