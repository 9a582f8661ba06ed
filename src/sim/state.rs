//! Simulation state and input samples
//!
//! Everything the engine mutates lives in [`SimulationState`]. Inputs from the
//! outside world ([`PointerSample`], [`Geometry`]) are plain `Copy` values so
//! each consumer reads its own snapshot.

use glam::Vec2;

use crate::consts::{ANCHOR_OFFSET_X, DRIFT_PERIOD, HOME_FRACTION_X, HOME_FRACTION_Y};

/// Last observed pointer position in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub pos: Vec2,
    /// False until the first pointer or touch event
    pub has_value: bool,
}

impl PointerSample {
    /// No input event has happened yet
    pub const NONE: Self = Self {
        pos: Vec2::ZERO,
        has_value: false,
    };

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            has_value: true,
        }
    }

    /// Pointer in container-local coordinates, if there is a usable sample
    pub fn local(&self, origin: Vec2) -> Option<Vec2> {
        if !self.has_value {
            return None;
        }
        let local = self.pos - origin;
        local.is_finite().then_some(local)
    }
}

/// Container and tracked element sizes, as last measured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub container: Vec2,
    pub element: Vec2,
}

impl Geometry {
    /// Non-finite components are stored as zero, which marks the geometry degenerate
    pub fn new(container: Vec2, element: Vec2) -> Self {
        let sanitize = |v: Vec2| {
            Vec2::new(
                if v.x.is_finite() { v.x } else { 0.0 },
                if v.y.is_finite() { v.y } else { 0.0 },
            )
        };
        Self {
            container: sanitize(container),
            element: sanitize(element),
        }
    }

    /// Travel range of the element's top-left corner on each axis
    #[inline]
    pub fn span(&self) -> Vec2 {
        self.container - self.element
    }

    /// True when there is no room to move in, so updates must not integrate
    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        !(self.container.x > 0.0
            && self.container.y > 0.0
            && self.element.x > 0.0
            && self.element.y > 0.0
            && span.x >= 0.0
            && span.y >= 0.0)
    }

    /// Clamp a top-left position into `[0, container - element]`
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.span().max(Vec2::ZERO))
    }

    /// Rectangle (min, max) of positions inset by `margin` from every edge.
    ///
    /// An axis too narrow for the inset collapses to its midpoint.
    pub fn safe_interior(&self, margin: f32) -> (Vec2, Vec2) {
        let span = self.span().max(Vec2::ZERO);
        let axis = |extent: f32| {
            if extent - margin > margin {
                (margin, extent - margin)
            } else {
                (extent / 2.0, extent / 2.0)
            }
        };
        let (min_x, max_x) = axis(span.x);
        let (min_y, max_y) = axis(span.y);
        (Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    /// Idle anchor: beside the companion target if one is given, else a fixed
    /// fraction of the container
    pub fn home_position(&self, anchor: Option<Vec2>) -> Vec2 {
        let raw = match anchor.filter(|a| a.is_finite()) {
            Some(a) => Vec2::new(a.x + ANCHOR_OFFSET_X, a.y - self.element.y / 2.0),
            None => self.container * Vec2::new(HOME_FRACTION_X, HOME_FRACTION_Y),
        };
        self.clamp(raw)
    }
}

/// Complete motion state of one tracked element
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Top-left corner, container-local (px)
    pub position: Vec2,
    /// px/s
    pub velocity: Vec2,
    /// Idle drift anchor
    pub home: Vec2,
    /// Per-instance phase offset for idle drift and flee steering
    pub seed: f32,
    /// Simulated seconds, advanced only by integrated frames
    pub elapsed: f64,
    pub geometry: Geometry,
}

impl SimulationState {
    /// State resting at home with zero velocity
    pub fn new(geometry: Geometry, anchor: Option<Vec2>, seed: f32) -> Self {
        let home = geometry.home_position(anchor);
        Self {
            position: home,
            velocity: Vec2::ZERO,
            home,
            seed,
            elapsed: 0.0,
            geometry,
        }
    }

    /// Centre of the tracked element
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.geometry.element / 2.0
    }

    /// Simulated time folded into one drift period, for the oscillators
    pub fn drift_phase(&self) -> f32 {
        self.elapsed.rem_euclid(f64::from(DRIFT_PERIOD)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry::new(Vec2::new(800.0, 600.0), Vec2::new(100.0, 40.0))
    }

    #[test]
    fn test_pointer_none_has_no_local() {
        assert_eq!(PointerSample::NONE.local(Vec2::ZERO), None);
        assert_eq!(PointerSample::default().local(Vec2::ZERO), None);
    }

    #[test]
    fn test_pointer_local_subtracts_origin() {
        let p = PointerSample::at(120.0, 80.0);
        assert_eq!(p.local(Vec2::new(20.0, 30.0)), Some(Vec2::new(100.0, 50.0)));
        assert_eq!(PointerSample::at(f32::NAN, 0.0).local(Vec2::ZERO), None);
    }

    #[test]
    fn test_degenerate_geometry() {
        assert!(!geometry().is_degenerate());
        assert!(Geometry::new(Vec2::ZERO, Vec2::new(10.0, 10.0)).is_degenerate());
        assert!(Geometry::new(Vec2::new(50.0, 50.0), Vec2::new(80.0, 10.0)).is_degenerate());
        assert!(Geometry::new(Vec2::new(f32::INFINITY, 50.0), Vec2::new(8.0, 8.0)).is_degenerate());
    }

    #[test]
    fn test_home_with_and_without_anchor() {
        let g = geometry();
        assert!(g.home_position(None).abs_diff_eq(Vec2::new(496.0, 330.0), 1e-3));
        assert_eq!(
            g.home_position(Some(Vec2::new(300.0, 320.0))),
            Vec2::new(440.0, 300.0)
        );
        // Anchor far right clamps into the travel range
        assert_eq!(g.home_position(Some(Vec2::new(780.0, 10.0))), Vec2::new(700.0, 0.0));
    }

    #[test]
    fn test_drift_phase_wraps() {
        let mut state = SimulationState::new(geometry(), None, 0.0);
        state.elapsed = 2.5;
        assert_eq!(state.drift_phase(), 2.5);
        state.elapsed = f64::from(DRIFT_PERIOD) * 4000.0 + 2.5;
        assert!((state.drift_phase() - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_safe_interior_insets_and_collapses() {
        let (min, max) = geometry().safe_interior(16.0);
        assert_eq!(min, Vec2::new(16.0, 16.0));
        assert_eq!(max, Vec2::new(684.0, 544.0));

        let narrow = Geometry::new(Vec2::new(120.0, 600.0), Vec2::new(100.0, 40.0));
        let (min, max) = narrow.safe_interior(16.0);
        assert_eq!(min.x, 10.0);
        assert_eq!(max.x, 10.0);
    }
}
