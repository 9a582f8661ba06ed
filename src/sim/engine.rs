//! Motion engine: one tracked element, its tuning and its random source
//!
//! The engine owns all mutable state. An external scheduler calls
//! [`MotionEngine::update`] once per frame; event hooks call the commands
//! between frames.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Geometry, PointerSample, SimulationState};
use super::tick::{Diagnostics, hold, step};
use crate::consts::SEED_RANGE;
use crate::debug::DebugOverlay;
use crate::error::ConfigError;
use crate::normalize_or_fallback;
use crate::tuning::Tuning;

/// Duration the render adapter should ease a teleport over
pub const TELEPORT_TRANSITION_MS: u32 = 110;

/// Result of one update, for the render adapter
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub position: Vec2,
    pub velocity: Vec2,
    pub diagnostics: Diagnostics,
    /// Present only while the debug overlay is enabled
    pub overlay: Option<DebugOverlay>,
}

/// A position change applied outside the integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    /// Suggested eased transition; zero means snap
    pub transition_ms: u32,
}

/// Evasive motion engine for a single element
#[derive(Debug, Clone)]
pub struct MotionEngine<R = Pcg32> {
    tuning: Tuning,
    state: SimulationState,
    rng: R,
    debug: bool,
    reduced_motion: bool,
}

impl MotionEngine<Pcg32> {
    /// Create an engine seeded from `seed`.
    ///
    /// `anchor` is the centre of the companion target in container-local
    /// coordinates, if there is one.
    pub fn new(
        tuning: Tuning,
        container: Vec2,
        element: Vec2,
        anchor: Option<Vec2>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(tuning, container, element, anchor, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> MotionEngine<R> {
    /// Create an engine drawing from an injected random source
    pub fn with_rng(
        tuning: Tuning,
        container: Vec2,
        element: Vec2,
        anchor: Option<Vec2>,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let seed = rng.random::<f32>() * SEED_RANGE;
        let geometry = Geometry::new(container, element);
        if geometry.is_degenerate() {
            log::warn!("Motion engine created with degenerate geometry {geometry:?}");
        }
        let state = SimulationState::new(geometry, anchor, seed);
        log::info!(
            "Motion engine created: home ({:.1}, {:.1}), container {:.0}x{:.0}",
            state.home.x,
            state.home.y,
            geometry.container.x,
            geometry.container.y
        );
        Ok(Self {
            tuning,
            state,
            rng,
            debug: false,
            reduced_motion: false,
        })
    }

    /// Advance one frame.
    ///
    /// `pointer` is in page coordinates; `origin` is the container's page
    /// offset this frame.
    pub fn update(&mut self, dt: f32, pointer: PointerSample, origin: Vec2) -> FrameOutput {
        let local = pointer.local(origin);
        let diagnostics = if self.reduced_motion {
            hold(&mut self.state, &self.tuning, local)
        } else {
            step(&mut self.state, &self.tuning, dt, local)
        };

        let overlay = self.debug.then(|| {
            log::trace!(
                "distance={:?} flee={:.3} panic={:.3} speed={:.1} cap={:.1}",
                diagnostics.distance,
                diagnostics.flee,
                diagnostics.panic,
                diagnostics.speed,
                diagnostics.cap
            );
            DebugOverlay::build(&self.tuning, self.state.center(), local, &diagnostics)
        });

        FrameOutput {
            position: self.state.position,
            velocity: self.state.velocity,
            diagnostics,
            overlay,
        }
    }

    /// Kick the element toward a random point in the inner safe area.
    ///
    /// Only velocity changes; returns the chosen target.
    pub fn apply_impulse(&mut self) -> Vec2 {
        let (min, max) = self.state.geometry.safe_interior(self.tuning.safe_margin * 2.0);
        let target = self.random_point(min, max);
        let dir = normalize_or_fallback(target - self.state.position);
        self.state.velocity += dir * self.tuning.impulse_strength;
        log::debug!("Impulse toward ({:.1}, {:.1})", target.x, target.y);
        target
    }

    /// Jump to a random point in the safe interior and stop.
    ///
    /// Bypasses the integrator; the caller should apply the placement right away.
    pub fn teleport_to_safe_spot(&mut self) -> Placement {
        let (min, max) = self.state.geometry.safe_interior(self.tuning.safe_margin);
        let position = self.random_point(min, max);
        self.state.position = position;
        self.state.velocity = Vec2::ZERO;
        log::debug!("Teleported to ({:.1}, {:.1})", position.x, position.y);
        Placement {
            position,
            transition_ms: TELEPORT_TRANSITION_MS,
        }
    }

    /// Take new container and element sizes after a resize.
    ///
    /// Home moves and the position is clamped into the new range; velocity and
    /// the simulation clock carry over.
    pub fn remeasure(&mut self, container: Vec2, element: Vec2, anchor: Option<Vec2>) {
        let geometry = Geometry::new(container, element);
        if geometry.is_degenerate() {
            log::warn!("Remeasured to degenerate geometry {geometry:?}; motion paused");
        }
        self.state.geometry = geometry;
        self.state.home = geometry.home_position(anchor);
        self.state.position = geometry.clamp(self.state.position);
        log::info!(
            "Remeasured: container {:.0}x{:.0}, home ({:.1}, {:.1})",
            geometry.container.x,
            geometry.container.y,
            self.state.home.x,
            self.state.home.y
        );
    }

    /// Toggle overlay output; simulation state is unaffected
    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug = enabled;
        log::info!("Debug overlay {}", if enabled { "on" } else { "off" });
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// While enabled, updates report diagnostics but do not move the element
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    /// Centre of the tracked element, container-local
    pub fn center(&self) -> Vec2 {
        self.state.center()
    }

    /// Uniform point strictly inside `(min, max)`; a collapsed axis gives its midpoint
    fn random_point(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(
            open_range(&mut self.rng, min.x, max.x),
            open_range(&mut self.rng, min.y, max.y),
        )
    }
}

fn open_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if !(max > min) {
        return (min + max) / 2.0;
    }
    let v = rng.random_range(min..max);
    if v > min { v } else { (min + max) / 2.0 }
}
