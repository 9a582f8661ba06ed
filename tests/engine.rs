use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use runaway_button::sim::{MotionEngine, PointerSample, idle_envelope};
use runaway_button::Tuning;

const DT: f32 = 1.0 / 60.0;

fn container() -> Vec2 {
    Vec2::new(800.0, 600.0)
}

fn element() -> Vec2 {
    Vec2::new(100.0, 40.0)
}

/// Engine whose element centre starts at (400, 300)
fn centered_engine(tuning: Tuning, seed: u64) -> MotionEngine {
    // Home is anchor + (140, -h/2), so this anchor puts the top-left at (350, 280)
    let anchor = Vec2::new(210.0, 300.0);
    let engine = MotionEngine::new(tuning, container(), element(), Some(anchor), seed).unwrap();
    assert_eq!(engine.center(), Vec2::new(400.0, 300.0));
    engine
}

fn bits(v: Vec2) -> [u32; 2] {
    v.to_array().map(f32::to_bits)
}

// ==================================================================================
// Scenarios
// ==================================================================================

#[test]
fn pointer_inside_hard_radius_flees_at_max_accel() {
    let tuning = Tuning {
        lateral_jitter: 0.0,
        ..Default::default()
    };
    let mut engine = centered_engine(tuning, 1);

    let out = engine.update(DT, PointerSample::at(420.0, 300.0), Vec2::ZERO);
    let diag = out.diagnostics;

    assert_eq!(diag.distance, Some(20.0));
    assert_eq!(diag.flee, 1.0);
    assert_eq!(diag.panic, 1.0);
    assert_eq!(diag.idle_accel, Vec2::ZERO);
    assert_eq!(diag.edge_accel, Vec2::ZERO);
    assert!((diag.accel - Vec2::new(-tuning.max_accel, 0.0)).length() < 1e-2);
    assert!(out.velocity.x < 0.0);
}

#[test]
fn lateral_twist_keeps_flight_pointing_away() {
    let tuning = Tuning::default();
    let mut engine = centered_engine(tuning, 2);

    let diag = engine
        .update(DT, PointerSample::at(420.0, 300.0), Vec2::ZERO)
        .diagnostics;

    assert!((diag.flee_accel.x + tuning.max_accel).abs() < 1e-2);
    assert!(diag.flee_accel.y.abs() <= tuning.max_accel * tuning.lateral_jitter * 0.55 + 1e-2);
}

#[test]
fn far_pointer_has_no_flee_contribution() {
    let mut engine = centered_engine(Tuning::default(), 3);

    let diag = engine
        .update(DT, PointerSample::at(900.0, 300.0), Vec2::ZERO)
        .diagnostics;

    assert_eq!(diag.distance, Some(500.0));
    assert_eq!(diag.flee, 0.0);
    assert_eq!(diag.panic, 0.0);
    assert_eq!(diag.flee_accel, Vec2::ZERO);
    assert!(diag.integrated);
}

#[test]
fn container_origin_converts_page_pointer() {
    let mut engine = centered_engine(Tuning::default(), 4);
    let origin = Vec2::new(1000.0, 2000.0);

    let diag = engine
        .update(DT, PointerSample::at(1420.0, 2300.0), origin)
        .diagnostics;

    assert_eq!(diag.distance, Some(20.0));
    assert_eq!(diag.panic, 1.0);
}

#[test]
fn shrinking_container_clamps_without_teleport() {
    let mut engine = centered_engine(Tuning::default(), 5);
    // Build up some motion to carry across the resize
    for _ in 0..20 {
        engine.update(DT, PointerSample::NONE, Vec2::ZERO);
    }
    let before = engine.position();
    let velocity = engine.velocity();
    let elapsed = engine.state().elapsed;

    engine.remeasure(Vec2::new(300.0, 200.0), element(), None);
    let span = Vec2::new(200.0, 160.0);
    // Clamped to the nearest edge, not moved somewhere random
    assert_eq!(engine.position(), before.clamp(Vec2::ZERO, span));
    assert_eq!(engine.velocity(), velocity);
    assert_eq!(engine.state().elapsed, elapsed);

    let out = engine.update(DT, PointerSample::NONE, Vec2::ZERO);
    assert!(out.position.cmpge(Vec2::ZERO).all() && out.position.cmple(span).all());
}

#[test]
fn degenerate_container_never_produces_nan() {
    let mut engine = centered_engine(Tuning::default(), 6);
    engine.remeasure(Vec2::ZERO, element(), None);
    for i in 0..120 {
        let out = engine.update(DT, PointerSample::at(i as f32, 0.0), Vec2::ZERO);
        assert!(out.position.is_finite());
        assert!(out.velocity.is_finite());
        assert!(!out.diagnostics.integrated);
    }
    engine.apply_impulse();
    engine.teleport_to_safe_spot();
    assert!(engine.position().is_finite());
}

// ==================================================================================
// Idle behaviour
// ==================================================================================

#[test]
fn no_pointer_stays_idle_within_envelope() {
    let tuning = Tuning::default();
    let mut engine = MotionEngine::new(tuning, container(), element(), None, 77).unwrap();
    let home = engine.state().home;
    let envelope = idle_envelope(tuning.idle_amplitude) + Vec2::splat(3.0);

    let mut moved = false;
    for _ in 0..(60 * 60) {
        let out = engine.update(DT, PointerSample::NONE, Vec2::ZERO);
        assert_eq!(out.diagnostics.panic, 0.0);
        assert_eq!(out.diagnostics.distance, None);
        assert_eq!(out.diagnostics.edge_accel, Vec2::ZERO);
        let offset = (out.position - home).abs();
        assert!(
            offset.cmple(envelope).all(),
            "drifted {offset:?} beyond {envelope:?}"
        );
        moved |= out.position != home;
    }
    assert!(moved, "idle drift never moved the element");
}

// ==================================================================================
// Determinism
// ==================================================================================

fn scripted_run(seed: u64) -> Vec<([u32; 2], [u32; 2])> {
    let mut engine = MotionEngine::new(Tuning::default(), container(), element(), None, seed).unwrap();
    (0..600)
        .map(|i| {
            let t = i as f32 * DT;
            let pointer = if i < 50 {
                PointerSample::NONE
            } else {
                PointerSample::at(400.0 + 200.0 * (t * 0.8).cos(), 300.0 + 150.0 * (t * 1.1).sin())
            };
            let dt = if i % 97 == 0 { 0.2 } else { DT };
            let out = engine.update(dt, pointer, Vec2::ZERO);
            (bits(out.position), bits(out.velocity))
        })
        .collect()
}

#[test]
fn same_seed_same_inputs_is_bit_identical() {
    assert_eq!(scripted_run(42), scripted_run(42));
}

#[test]
fn different_seeds_move_differently() {
    assert_ne!(scripted_run(1), scripted_run(2));
}

#[test]
fn injected_rng_drives_commands() {
    let make = || {
        MotionEngine::with_rng(
            Tuning::default(),
            container(),
            element(),
            None,
            StdRng::seed_from_u64(9),
        )
        .unwrap()
    };
    let mut a = make();
    let mut b = make();
    for _ in 0..10 {
        assert_eq!(a.teleport_to_safe_spot(), b.teleport_to_safe_spot());
        assert_eq!(a.apply_impulse(), b.apply_impulse());
    }
}

// ==================================================================================
// Commands
// ==================================================================================

#[test]
fn teleport_lands_inside_safe_interior_at_rest() {
    let tuning = Tuning::default();
    let mut engine = MotionEngine::new(tuning, container(), element(), None, 123).unwrap();
    let span = container() - element();
    let margin = tuning.safe_margin;

    for _ in 0..500 {
        engine.apply_impulse();
        let placement = engine.teleport_to_safe_spot();
        let p = placement.position;
        assert_eq!(engine.velocity(), Vec2::ZERO);
        assert!(p.x > margin && p.x < span.x - margin, "x {}", p.x);
        assert!(p.y > margin && p.y < span.y - margin, "y {}", p.y);
    }
}

#[test]
fn impulse_is_visible_even_while_panicking() {
    let mut engine = centered_engine(Tuning::default(), 8);
    let pointer = PointerSample::at(420.0, 300.0);
    engine.update(DT, pointer, Vec2::ZERO);

    let before = engine.position();
    engine.apply_impulse();
    let out = engine.update(DT, pointer, Vec2::ZERO);
    assert!(out.position.distance(before) > 1.0);
}

#[test]
fn zero_step_after_impulse_reports_capped_speed() {
    let mut engine = centered_engine(Tuning::default(), 10);
    engine.apply_impulse();
    let before = engine.position();
    let out = engine.update(0.0, PointerSample::NONE, Vec2::ZERO);
    assert!(!out.diagnostics.integrated);
    assert_eq!(out.position, before);
    assert!(out.diagnostics.speed <= out.diagnostics.cap + 1e-3);
    assert!(out.velocity.length() <= out.diagnostics.cap + 1e-3);
}
