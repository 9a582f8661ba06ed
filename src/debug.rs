//! Debug overlay draw list
//!
//! Built from a frame's diagnostics; the render adapter draws it however it
//! likes. Nothing here feeds back into the simulation.

use glam::Vec2;

use crate::sim::Diagnostics;
use crate::tuning::Tuning;

/// Radius of the pointer and centre dots
pub const MARKER_RADIUS: f32 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Everything the overlay draws for one frame, container-local
#[derive(Debug, Clone, PartialEq)]
pub struct DebugOverlay {
    pub fear_ring: Circle,
    pub hard_ring: Circle,
    /// Pointer to element centre, when there is a pointer
    pub pointer_line: Option<Segment>,
    pub markers: Vec<Circle>,
    pub readouts: [String; 3],
}

impl DebugOverlay {
    pub fn build(
        tuning: &Tuning,
        center: Vec2,
        pointer: Option<Vec2>,
        diag: &Diagnostics,
    ) -> Self {
        let mut markers = vec![Circle {
            center,
            radius: MARKER_RADIUS,
        }];
        if let Some(p) = pointer {
            markers.insert(
                0,
                Circle {
                    center: p,
                    radius: MARKER_RADIUS,
                },
            );
        }

        Self {
            fear_ring: Circle {
                center,
                radius: tuning.fear_radius,
            },
            hard_ring: Circle {
                center,
                radius: tuning.hard_radius,
            },
            pointer_line: pointer.map(|from| Segment { from, to: center }),
            markers,
            readouts: readouts(diag),
        }
    }

    /// Readouts joined with newlines
    pub fn text(&self) -> String {
        self.readouts.join("\n")
    }
}

/// The three numeric readout lines
pub fn readouts(diag: &Diagnostics) -> [String; 3] {
    let distance = match diag.distance {
        Some(d) if d.is_finite() => format!("distance: {d:.1} px"),
        _ => "distance: — px".to_string(),
    };
    [
        distance,
        format!("flee: {:.3}  panic: {:.3}", diag.flee, diag.panic),
        format!("speed: {:.1} / cap {:.1} px/s", diag.speed, diag.cap),
    ]
}
