// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod input {
    include!("../src/core/input.rs");
}

use constants::*;
use input::*;

#[test]
fn wheel_pixels_pass_through_until_the_spike_cap() {
    assert_eq!(normalize_wheel(40.0, DELTA_PIXEL, 800.0), 40.0);
    assert_eq!(normalize_wheel(-500.0, DELTA_PIXEL, 800.0), -WHEEL_SPIKE_MAX);
}

#[test]
fn wheel_lines_and_pages_become_pixels() {
    assert_eq!(normalize_wheel(3.0, DELTA_LINE, 800.0), 3.0 * WHEEL_LINE_PX);
    // One page is far past the cap
    assert_eq!(normalize_wheel(1.0, DELTA_PAGE, 800.0), WHEEL_SPIKE_MAX);
}

#[test]
fn wheel_rejects_non_finite_deltas() {
    assert_eq!(normalize_wheel(f64::NAN, DELTA_PIXEL, 800.0), 0.0);
    assert_eq!(clamp_event_delta(f64::INFINITY, MAX_EVENT_DELTA), 0.0);
}

#[test]
fn keys_map_to_signed_steps() {
    assert_eq!(key_step("ArrowDown"), Some(KEY_STEP));
    assert_eq!(key_step("PageDown"), Some(KEY_STEP));
    assert_eq!(key_step(" "), Some(KEY_STEP));
    assert_eq!(key_step("ArrowUp"), Some(-KEY_STEP));
    assert_eq!(key_step("PageUp"), Some(-KEY_STEP));
    assert_eq!(key_step("Enter"), None);
}

#[test]
fn advance_is_clamped_then_scaled() {
    let a = timeline_advance(1000.0, MAX_EVENT_DELTA_SMALL);
    assert!((a - MAX_EVENT_DELTA_SMALL * TIMELINE_PER_WHEEL).abs() < 1e-12);
    let b = timeline_advance(-10.0, MAX_EVENT_DELTA);
    assert!((b + 10.0 * TIMELINE_PER_WHEEL).abs() < 1e-12);
}

#[test]
fn background_drag_feeds_vertical_deltas() {
    let mut g = TouchGesture::default();
    assert_eq!(g.update(0.0, 0.0), None, "no gesture yet");
    g.begin(100.0, 300.0, TouchOrigin::Background);
    assert!(g.is_active());
    // Finger moves up: positive delta advances the timeline
    assert_eq!(g.update(100.0, 280.0), Some(20.0));
    assert_eq!(g.update(100.0, 290.0), Some(-10.0));
}

#[test]
fn nav_touches_never_drive_the_timeline() {
    let mut g = TouchGesture::default();
    g.begin(10.0, 10.0, TouchOrigin::Nav);
    assert_eq!(g.update(10.0, -200.0), None);
    assert!(g.end(TOUCH_DRAG_MULTIPLIER).is_none());
    assert!(!g.is_active());
}

#[test]
fn horizontal_scroller_swipes_are_left_alone() {
    let mut g = TouchGesture::default();
    g.begin(200.0, 200.0, TouchOrigin::Scroller);
    assert_eq!(g.update(150.0, 195.0), None);
    assert!(g.end(TOUCH_DRAG_MULTIPLIER).is_none());

    g.begin(200.0, 200.0, TouchOrigin::Scroller);
    assert_eq!(g.update(198.0, 170.0), Some(30.0));
}

#[test]
fn fast_release_launches_inertia() {
    let mut g = TouchGesture::default();
    g.begin(0.0, 500.0, TouchOrigin::Background);
    for y in (100..500).rev().step_by(40) {
        g.update(0.0, y as f64);
    }
    assert!(g.velocity() > 0.0);
    let inertia = g.end(TOUCH_DRAG_MULTIPLIER).expect("should coast");
    assert!((inertia.velocity() - g.velocity() * TOUCH_DRAG_MULTIPLIER).abs() < 1e-9);
}

#[test]
fn slow_release_does_not_coast() {
    assert!(Inertia::launch(INERTIA_MIN_VELOCITY / 2.0).is_none());
    let mut g = TouchGesture::default();
    g.begin(0.0, 0.0, TouchOrigin::Background);
    assert!(g.end(TOUCH_DRAG_MULTIPLIER).is_none());
}

#[test]
fn inertia_decays_and_stops() {
    let mut inertia = Inertia::launch(30.0).unwrap();
    let mut last = f64::INFINITY;
    let mut steps = 0;
    while let Some(delta) = inertia.step() {
        assert!(delta.abs() < last);
        last = delta.abs();
        steps += 1;
        assert!(steps < 10_000);
    }
    assert!(steps > 1);
    assert!(inertia.velocity().abs() <= INERTIA_MIN_VELOCITY);
    assert_eq!(inertia.step(), None);
}

#[test]
fn new_gesture_resets_velocity() {
    let mut g = TouchGesture::default();
    g.begin(0.0, 400.0, TouchOrigin::Background);
    g.update(0.0, 100.0);
    assert!(g.velocity() > 0.0);
    g.begin(0.0, 400.0, TouchOrigin::Background);
    assert_eq!(g.velocity(), 0.0);
}
