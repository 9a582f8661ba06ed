//! Browser binding
//!
//! Thin wasm-bindgen wrapper around one engine and its pressure meter. The
//! page script owns the DOM, forwards pointer and resize events, and calls
//! `frame` from `requestAnimationFrame`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::clock::FrameClock;
use crate::settings::Settings;
use crate::sim::{MeterEvent, MotionEngine, PointerSample, PressureMeter};
use crate::tuning::PressureTuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Runaway button module loaded");
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebEngine {
    engine: MotionEngine,
    meter: PressureMeter,
    clock: FrameClock,
    pointer: PointerSample,
    escalated: bool,
}

#[wasm_bindgen]
impl WebEngine {
    /// `settings_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings_json: &str,
        container_w: f32,
        container_h: f32,
        element_w: f32,
        element_h: f32,
    ) -> Result<WebEngine, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(js_error)?
        };
        let tuning = settings.effective_tuning().map_err(js_error)?;
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;

        let mut engine = MotionEngine::new(
            tuning,
            Vec2::new(container_w, container_h),
            Vec2::new(element_w, element_h),
            None,
            seed,
        )
        .map_err(js_error)?;
        engine.set_reduced_motion(settings.reduced_motion);
        engine.set_debug_enabled(settings.debug_overlay);

        let meter = PressureMeter::new(PressureTuning::default()).map_err(js_error)?;
        Ok(WebEngine {
            clock: FrameClock::new(tuning.max_frame_dt),
            engine,
            meter,
            pointer: PointerSample::NONE,
            escalated: false,
        })
    }

    pub fn start(&mut self) -> bool {
        self.clock.start()
    }

    pub fn stop(&mut self) -> bool {
        self.clock.stop()
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = PointerSample::at(x, y);
    }

    /// Run one frame; returns `[x, y]` of the new top-left, or empty while stopped
    pub fn frame(&mut self, now_ms: f64, origin_x: f32, origin_y: f32) -> Vec<f32> {
        let Some(dt) = self.clock.advance(now_ms) else {
            return Vec::new();
        };
        let out = self.engine.update(dt, self.pointer, Vec2::new(origin_x, origin_y));
        if self.meter.update(dt, out.diagnostics.distance) == Some(MeterEvent::Escalated) {
            self.escalated = true;
        }
        vec![out.position.x, out.position.y]
    }

    /// Press on the element: nudge it and feed the meter
    pub fn nudge(&mut self) {
        self.meter.press();
        self.engine.apply_impulse();
    }

    /// Focus reached the element; returns `[x, y, transition_ms]`
    pub fn teleport(&mut self) -> Vec<f32> {
        let placement = self.engine.teleport_to_safe_spot();
        vec![
            placement.position.x,
            placement.position.y,
            placement.transition_ms as f32,
        ]
    }

    /// Anchor coordinates are the companion target's centre, container-local
    pub fn remeasure(
        &mut self,
        container_w: f32,
        container_h: f32,
        element_w: f32,
        element_h: f32,
        anchor_x: Option<f32>,
        anchor_y: Option<f32>,
    ) {
        let anchor = anchor_x.zip(anchor_y).map(|(x, y)| Vec2::new(x, y));
        self.engine.remeasure(
            Vec2::new(container_w, container_h),
            Vec2::new(element_w, element_h),
            anchor,
        );
    }

    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.engine.set_debug_enabled(enabled);
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.engine.set_reduced_motion(enabled);
    }

    /// Overlay readouts for the current state, if debug is on
    pub fn debug_text(&mut self, origin_x: f32, origin_y: f32) -> Option<String> {
        self.engine
            .update(0.0, self.pointer, Vec2::new(origin_x, origin_y))
            .overlay
            .map(|o| o.text())
    }

    pub fn pressure_heat(&self) -> f32 {
        self.meter.heat()
    }

    /// True once per escalation; clears on read
    pub fn take_escalation(&mut self) -> bool {
        std::mem::take(&mut self.escalated)
    }

    pub fn reset_pressure(&mut self) -> bool {
        self.meter.reset()
    }
}
