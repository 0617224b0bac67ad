use super::config::EngineConfig;
use super::constants::*;
use super::input::{timeline_advance, InputEvent};
use super::playback::{video_action, PlayAction};
use super::timeline::{compose_frame, LayerPose, Segment, Timeline, TimelineError};
use std::sync::atomic::{AtomicBool, Ordering};

/// Backend the engine draws into. The page implements it over DOM layers;
/// tests implement it over plain vectors.
pub trait RenderTarget {
    fn set_scale(&mut self, index: usize, scale: f64);
    fn set_z_order(&mut self, index: usize, z: i32);
    fn set_visible(&mut self, index: usize, visible: bool);
    fn is_video(&self, index: usize) -> bool;
    /// Only asked for videos, after scale and visibility were applied.
    fn on_screen(&self, index: usize) -> bool;
    fn set_playing(&mut self, index: usize, playing: bool);
}

/// At most one render may be scheduled at a time.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: AtomicBool,
}

impl FrameGate {
    /// `true` if the caller won the right to schedule a frame.
    #[inline]
    pub fn try_acquire(&self) -> bool {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[inline]
    pub fn release(&self) {
        self.pending.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// Outcome of one rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub segment: Segment,
    /// The caller should request another animation frame.
    pub reschedule: bool,
}

/// Engine context: timeline, tuning and scheduling state for one slideshow.
pub struct ZoomEngine {
    timeline: Timeline,
    config: EngineConfig,
    poses: Vec<LayerPose>,
    gate: FrameGate,
    defer_videos_until: f64,
    started: bool,
}

impl ZoomEngine {
    pub fn new(layer_count: usize, config: EngineConfig) -> Result<Self, TimelineError> {
        Ok(Self {
            timeline: Timeline::new(layer_count)?,
            config,
            poses: vec![LayerPose::default(); layer_count],
            gate: FrameGate::default(),
            defer_videos_until: 0.0,
            started: false,
        })
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn poses(&self) -> &[LayerPose] {
        &self.poses
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn frame_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Scale a freshly built layer gets before the first frame.
    pub fn initial_scale(index: usize) -> f64 {
        if index == 0 {
            1.0
        } else {
            START_SCALE
        }
    }

    /// Move to the default view. Returns `false` if already started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.timeline
            .jump_to(INITIAL_INDEX as f64 + INITIAL_PROGRESS);
        log::info!(
            "[engine] start layers={} t={:.3}",
            self.timeline.len(),
            self.timeline.position()
        );
        true
    }

    /// Positions rendered once each before reveal to warm decoders.
    pub fn warm_up_positions(&self) -> Vec<f64> {
        (0..self.timeline.len())
            .flat_map(|i| WARM_UP_SAMPLES.iter().map(move |s| i as f64 + s))
            .collect()
    }

    /// Render every warm-up position, then restore the timeline.
    pub fn warm_up(&mut self, target: &mut impl RenderTarget, now_ms: f64) {
        let saved = self.timeline.clone();
        for pos in self.warm_up_positions() {
            self.timeline.jump_to(pos);
            self.draw(target, now_ms);
        }
        self.timeline = saved;
    }

    /// Feed one input event. Returns `true` when the caller must request an
    /// animation frame (no frame was pending yet).
    pub fn handle(&mut self, event: InputEvent, now_ms: f64) -> bool {
        let delta = match event {
            InputEvent::Wheel(d) | InputEvent::Key(d) | InputEvent::Inertia(d) => d,
            InputEvent::TouchDrag(d) => d * self.config.touch_multiplier,
        };
        self.timeline
            .nudge(timeline_advance(delta, self.config.max_event_delta));
        self.defer_videos_until = now_ms + self.config.video_defer_ms;
        self.gate.try_acquire()
    }

    /// Ask for a frame without moving the timeline.
    pub fn request_frame(&self) -> bool {
        self.gate.try_acquire()
    }

    /// The animation-frame callback: ease, pose, apply.
    pub fn render(&mut self, target: &mut impl RenderTarget, now_ms: f64) -> FrameReport {
        self.gate.release();
        self.timeline.tick();
        let segment = self.draw(target, now_ms);
        let reschedule = !self.timeline.is_settled() && self.gate.try_acquire();
        FrameReport {
            segment,
            reschedule,
        }
    }

    fn draw(&mut self, target: &mut impl RenderTarget, now_ms: f64) -> Segment {
        let seg = self.timeline.segment();
        compose_frame(
            &seg,
            self.config.zoom_max,
            self.config.active_radius,
            &mut self.poses,
        );
        for (i, pose) in self.poses.iter().enumerate() {
            target.set_visible(i, pose.visible);
            target.set_scale(i, pose.scale);
            target.set_z_order(i, pose.z);
        }
        for i in 0..self.poses.len() {
            if !target.is_video(i) {
                continue;
            }
            let on_screen = target.on_screen(i);
            let action = video_action(i, &seg, on_screen, now_ms, self.defer_videos_until);
            target.set_playing(i, action == PlayAction::Play);
        }
        seg
    }
}
