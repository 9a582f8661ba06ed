//! Frame clock and multi-engine scene
//!
//! The host owns the display-synchronised callback. These types turn its
//! timestamps into clamped steps and fan one pointer sample out to every
//! engine in a frame.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::{FrameOutput, MotionEngine, PointerSample};

/// Converts callback timestamps into frame steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    running: bool,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            running: false,
            max_dt,
        }
    }

    /// Begin producing steps. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_ms = None;
        log::info!("Frame clock started");
        true
    }

    /// Stop producing steps. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.last_ms = None;
        log::info!("Frame clock stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Step for the frame at `now_ms`.
    ///
    /// `None` while stopped; `Some(0.0)` on the first frame after a start;
    /// otherwise the elapsed seconds clamped to `[0, max_dt]`.
    pub fn advance(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = match self.last_ms {
            Some(prev) => {
                let dt = ((now_ms - prev) / 1000.0) as f32;
                if dt.is_finite() {
                    dt.clamp(0.0, self.max_dt)
                } else {
                    0.0
                }
            }
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        Some(dt)
    }
}

/// One engine and the page offset of its container
#[derive(Debug, Clone)]
pub struct SceneEntry<R = Pcg32> {
    pub engine: MotionEngine<R>,
    pub origin: Vec2,
}

/// Independent engines updated in sequence each frame
#[derive(Debug, Clone)]
pub struct Scene<R = Pcg32> {
    entries: Vec<SceneEntry<R>>,
}

impl<R> Default for Scene<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R: Rng> Scene<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an engine; returns its index
    pub fn add(&mut self, engine: MotionEngine<R>, origin: Vec2) -> usize {
        self.entries.push(SceneEntry { engine, origin });
        self.entries.len() - 1
    }

    /// Update the container offset of one engine (scroll, layout shift)
    pub fn set_origin(&mut self, index: usize, origin: Vec2) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.origin = origin;
        }
    }

    pub fn engine(&self, index: usize) -> Option<&MotionEngine<R>> {
        self.entries.get(index).map(|e| &e.engine)
    }

    pub fn engine_mut(&mut self, index: usize) -> Option<&mut MotionEngine<R>> {
        self.entries.get_mut(index).map(|e| &mut e.engine)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance every engine with its own copy of the same pointer sample
    pub fn frame(&mut self, dt: f32, pointer: PointerSample) -> Vec<FrameOutput> {
        self.entries
            .iter_mut()
            .map(|entry| entry.engine.update(dt, pointer, entry.origin))
            .collect()
    }
}
