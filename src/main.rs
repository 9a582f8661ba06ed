//! Runaway Button headless demo
//!
//! Drives one engine with a scripted pointer and prints what happened.
//! The browser build uses `web::WebEngine` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Runaway Button (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{path}: {err}");
                std::process::exit(1);
            }
        },
        None => runaway_button::Settings::default(),
    };

    match run_demo(&settings) {
        Ok(summary) => println!("{summary}"),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Result<runaway_button::Settings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(runaway_button::Settings::from_json(&json)?)
}

/// Sweep the pointer in toward the element, linger, then press and focus it
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(settings: &runaway_button::Settings) -> Result<String, runaway_button::ConfigError> {
    use glam::Vec2;
    use runaway_button::sim::MeterEvent;
    use runaway_button::{FrameClock, MotionEngine, PointerSample, PressureMeter, PressureTuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 60 * 8;

    let tuning = settings.effective_tuning()?;
    let container = Vec2::new(800.0, 600.0);
    let element = Vec2::new(110.0, 44.0);
    let anchor = Some(Vec2::new(300.0, 330.0));

    let mut engine = MotionEngine::new(tuning, container, element, anchor, 0x5eed)?;
    engine.set_debug_enabled(settings.debug_overlay);
    engine.set_reduced_motion(settings.reduced_motion);
    let mut meter = PressureMeter::new(PressureTuning::default())?;
    let mut clock = FrameClock::new(tuning.max_frame_dt);
    clock.start();

    let mut max_panic: f32 = 0.0;
    let mut escalated_at = None;
    for frame in 0..FRAMES {
        let now = frame as f64 * FRAME_MS;
        let Some(dt) = clock.advance(now) else {
            break;
        };

        // Chase the element's current centre from a shrinking orbit
        let secs = now as f32 / 1000.0;
        let orbit = (300.0 - secs * 40.0).max(30.0);
        let target = engine.center();
        let pointer = if frame < 30 {
            PointerSample::NONE
        } else {
            PointerSample::at(
                target.x + orbit * (secs * 1.3).cos(),
                target.y + orbit * (secs * 1.3).sin(),
            )
        };

        if frame == 240 {
            meter.press();
            engine.apply_impulse();
        }
        if frame == 400 {
            engine.teleport_to_safe_spot();
        }

        let out = engine.update(dt, pointer, Vec2::ZERO);
        max_panic = max_panic.max(out.diagnostics.panic);
        if meter.update(dt, out.diagnostics.distance) == Some(MeterEvent::Escalated) {
            escalated_at = Some(frame);
        }
        if let Some(overlay) = &out.overlay {
            if frame % 60 == 0 {
                log::debug!("{}", overlay.text().replace('\n', " | "));
            }
        }
    }
    clock.stop();

    let pos = engine.position();
    Ok(format!(
        "frames: {FRAMES}\nfinal position: ({:.1}, {:.1})\nmax panic: {:.3}\nescalation: {}",
        pos.x,
        pos.y,
        max_panic,
        match escalated_at {
            Some(frame) => format!("frame {frame}"),
            None => "none".to_string(),
        }
    ))
}
