// Host-side tests for the zoom engine driven against an in-memory target.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod config {
    include!("../src/core/config.rs");
}
mod input {
    include!("../src/core/input.rs");
}
mod playback {
    include!("../src/core/playback.rs");
}
mod timeline {
    include!("../src/core/timeline.rs");
}
mod engine {
    include!("../src/core/engine.rs");
}

use config::*;
use constants::*;
use engine::*;
use input::InputEvent;
use playback::*;

/// Records the last value written per layer.
#[derive(Default)]
struct MockLayers {
    scale: Vec<f64>,
    z: Vec<i32>,
    visible: Vec<bool>,
    videos: Vec<bool>,
    on_screen: Vec<bool>,
    playing: Vec<bool>,
    writes: usize,
}

impl MockLayers {
    fn new(len: usize, videos: &[usize]) -> Self {
        Self {
            scale: vec![0.0; len],
            z: vec![0; len],
            visible: vec![false; len],
            videos: (0..len).map(|i| videos.contains(&i)).collect(),
            on_screen: vec![false; len],
            playing: vec![false; len],
            writes: 0,
        }
    }
}

impl RenderTarget for MockLayers {
    fn set_scale(&mut self, index: usize, scale: f64) {
        self.scale[index] = scale;
        self.writes += 1;
    }
    fn set_z_order(&mut self, index: usize, z: i32) {
        self.z[index] = z;
    }
    fn set_visible(&mut self, index: usize, visible: bool) {
        self.visible[index] = visible;
    }
    fn is_video(&self, index: usize) -> bool {
        self.videos[index]
    }
    fn on_screen(&self, index: usize) -> bool {
        self.on_screen[index]
    }
    fn set_playing(&mut self, index: usize, playing: bool) {
        self.playing[index] = playing;
    }
}

fn engine(len: usize) -> ZoomEngine {
    ZoomEngine::new(len, EngineConfig::default()).unwrap()
}

#[test]
fn empty_layer_list_is_an_error() {
    assert!(ZoomEngine::new(0, EngineConfig::default()).is_err());
}

#[test]
fn start_is_idempotent() {
    let mut e = engine(17);
    assert!(e.start());
    let pos = e.timeline().position();
    assert!((pos - (INITIAL_INDEX as f64 + INITIAL_PROGRESS)).abs() < 1e-12);
    assert!(!e.start());
    assert_eq!(e.timeline().position(), pos);
    assert!(e.is_started());
}

#[test]
fn initial_scales_show_only_the_first_layer() {
    assert_eq!(ZoomEngine::initial_scale(0), 1.0);
    assert_eq!(ZoomEngine::initial_scale(1), START_SCALE);
    assert_eq!(ZoomEngine::initial_scale(16), START_SCALE);
}

#[test]
fn only_one_frame_is_ever_pending() {
    let mut e = engine(5);
    assert!(e.handle(InputEvent::Wheel(40.0), 0.0));
    // Burst of input while the frame is queued: no extra scheduling
    for _ in 0..10 {
        assert!(!e.handle(InputEvent::Wheel(40.0), 1.0));
    }
    assert!(!e.request_frame());
    assert!(e.frame_pending());

    let mut layers = MockLayers::new(5, &[]);
    let report = e.render(&mut layers, 16.0);
    // Not settled yet, so the render itself re-arms the gate
    assert!(report.reschedule);
    assert!(e.frame_pending());
    assert!(!e.handle(InputEvent::Wheel(1.0), 17.0));
}

#[test]
fn rendering_stops_once_settled() {
    let mut e = engine(5);
    let mut layers = MockLayers::new(5, &[]);
    e.handle(InputEvent::Key(KEY_STEP), 0.0);
    let mut frames = 0;
    loop {
        let report = e.render(&mut layers, frames as f64 * 16.0);
        frames += 1;
        if !report.reschedule {
            break;
        }
        assert!(frames < 1000);
    }
    assert!(e.timeline().is_settled());
    assert!(!e.frame_pending());
    // Fresh input schedules again
    assert!(e.handle(InputEvent::Key(-KEY_STEP), 0.0));
}

#[test]
fn event_deltas_are_clamped() {
    let mut e = engine(5);
    e.handle(InputEvent::Wheel(1e6), 0.0);
    let expected = MAX_EVENT_DELTA * TIMELINE_PER_WHEEL;
    assert!((e.timeline().target() - expected).abs() < 1e-12);
}

#[test]
fn touch_drag_uses_the_profile_multiplier() {
    let cfg = EngineConfig::for_profile(Profile {
        small_screen: true,
        ..Profile::default()
    });
    let mut e = ZoomEngine::new(5, cfg).unwrap();
    e.handle(InputEvent::TouchDrag(10.0), 0.0);
    let expected = 10.0 * TOUCH_DRAG_MULTIPLIER_SMALL * TIMELINE_PER_WHEEL;
    assert!((e.timeline().target() - expected).abs() < 1e-12);
}

#[test]
fn lite_profiles_cap_zoom_and_window() {
    let small = EngineConfig::for_profile(Profile {
        small_screen: true,
        ..Profile::default()
    });
    assert_eq!(small.zoom_max, ZOOM_MAX_LITE);
    assert_eq!(small.active_radius, ACTIVE_RADIUS_SMALL);
    assert_eq!(small.preload_concurrency, PRELOAD_CONCURRENCY_LITE);
    assert!(!small.warm_up);

    let save_data = EngineConfig::for_profile(Profile {
        save_data: true,
        ..Profile::default()
    });
    assert_eq!(save_data.zoom_max, ZOOM_MAX_LITE);
    assert_eq!(save_data.active_radius, ACTIVE_RADIUS);
    assert!(save_data.warm_up);

    let desktop = EngineConfig::default();
    assert_eq!(desktop.zoom_max, ZOOM_MAX);
    assert_eq!(desktop.preload_concurrency, PRELOAD_CONCURRENCY);
}

#[test]
fn warm_up_visits_every_layer_and_restores_the_timeline() {
    let mut e = engine(4);
    e.start();
    let before = (e.timeline().position(), e.timeline().target());
    assert_eq!(e.warm_up_positions().len(), 4 * WARM_UP_SAMPLES.len());

    let mut layers = MockLayers::new(4, &[]);
    e.warm_up(&mut layers, 0.0);
    assert_eq!(layers.writes, 4 * 4 * WARM_UP_SAMPLES.len());
    assert_eq!((e.timeline().position(), e.timeline().target()), before);
}

#[test]
fn render_applies_roles_to_the_target() {
    let mut e = engine(8);
    e.start();
    let mut layers = MockLayers::new(8, &[]);
    let report = e.render(&mut layers, 0.0);
    let seg = report.segment;
    assert_eq!(seg.index, INITIAL_INDEX);
    assert_eq!(layers.z[seg.next], Z_NEXT);
    assert_eq!(layers.z[seg.index], Z_CURRENT);
    assert!(layers.scale[seg.index] > 1.0);
    assert!(layers.scale[seg.next] < 1.0);
    // Radius 3 around index 1 on a ring of 8 leaves index 5 parked
    assert!(!layers.visible[5]);
    assert_eq!(layers.scale[5], START_SCALE);
}

#[test]
fn videos_play_when_current_next_or_on_screen() {
    let mut e = engine(8);
    e.start();
    // current = 1, next = 2; 5 is on screen, 6 is not
    let mut layers = MockLayers::new(8, &[1, 2, 5, 6]);
    layers.on_screen[5] = true;
    e.render(&mut layers, 0.0);
    assert!(layers.playing[1]);
    assert!(layers.playing[2]);
    assert!(layers.playing[5]);
    assert!(!layers.playing[6]);
}

#[test]
fn video_starts_are_deferred_during_input() {
    let mut e = engine(8);
    e.start();
    let mut layers = MockLayers::new(8, &[1, 2]);
    layers.on_screen[2] = true;
    e.handle(InputEvent::Wheel(1.0), 1000.0);
    e.render(&mut layers, 1010.0);
    // Off-screen current waits; on-screen next may run
    assert!(!layers.playing[1]);
    assert!(layers.playing[2]);

    let later = 1000.0 + e.config().video_defer_ms + 1.0;
    e.render(&mut layers, later);
    assert!(layers.playing[1]);
}

#[test]
fn viewport_intersection_needs_a_displayed_box() {
    let r = Rect {
        left: 10.0,
        top: 10.0,
        right: 50.0,
        bottom: 50.0,
    };
    assert!(intersects_viewport(r, 100.0, 100.0, true));
    assert!(!intersects_viewport(r, 100.0, 100.0, false));
    let off = Rect {
        left: 120.0,
        right: 200.0,
        ..r
    };
    assert!(!intersects_viewport(off, 100.0, 100.0, true));
    assert!(!intersects_viewport(Rect::default(), 100.0, 100.0, true));
}
