/// Timeline and zoom tuning constants.
///
/// Scales are CSS `scale()` factors; timeline units are "layers", so an
/// advance of 1.0 moves exactly one slide forward.
// Exponential easing factor applied to the timeline each frame
pub const SMOOTHING: f64 = 0.12;
// Distance below which the timeline counts as settled
pub const SETTLE_EPSILON: f64 = 0.0005;

// Scale at the end of a segment (desktop) and the lite-mode cap
pub const ZOOM_MAX: f64 = 1.6;
pub const ZOOM_MAX_LITE: f64 = 1.4;
// Scale for parked layers (as small as possible without vanishing)
pub const START_SCALE: f64 = 0.001;
// Extra growth of the previous layer during the handoff
pub const CONTINUE_GROWTH: f64 = 0.55;
// Share of a segment during which the two-back layer is held large
pub const TAIL_HOLD: f64 = 0.55;

// z-order per role
pub const Z_PREV2: i32 = 0;
pub const Z_BASE: i32 = 1;
pub const Z_PREV: i32 = 1;
pub const Z_CURRENT: i32 = 2;
pub const Z_NEXT: i32 = 3;

// Number of neighbours on each side kept displayed
pub const ACTIVE_RADIUS: usize = 3;
pub const ACTIVE_RADIUS_SMALL: usize = 1;

// Default view: second layer current, 60% into the third
pub const INITIAL_INDEX: usize = 1;
pub const INITIAL_PROGRESS: f64 = 0.6;

// Warm-up sample offsets rendered once per layer before reveal
pub const WARM_UP_SAMPLES: [f64; 3] = [0.0, 0.6, 0.98];

// Input sensitivity
pub const TIMELINE_PER_WHEEL: f64 = 0.0008;
pub const TOUCH_DRAG_MULTIPLIER: f64 = 3.0;
pub const TOUCH_DRAG_MULTIPLIER_SMALL: f64 = 2.2;
pub const MAX_EVENT_DELTA: f64 = 360.0;
pub const MAX_EVENT_DELTA_SMALL: f64 = 220.0;
pub const WHEEL_SPIKE_MAX: f64 = 120.0;
pub const WHEEL_LINE_PX: f64 = 16.0;
pub const KEY_STEP: f64 = 60.0;

// Touch velocity low-pass (new = keep * old + (1 - keep) * sample)
pub const TOUCH_VELOCITY_KEEP: f64 = 0.85;
// Inertia decay per frame and stop threshold
pub const INERTIA_FRICTION: f64 = 0.92;
pub const INERTIA_MIN_VELOCITY: f64 = 0.05;

// Video starts are deferred this long after the last input (ms)
pub const VIDEO_DEFER_MS: f64 = 80.0;
pub const VIDEO_DEFER_MS_SMALL: f64 = 140.0;

// Preload pool width
pub const PRELOAD_CONCURRENCY: usize = 5;
pub const PRELOAD_CONCURRENCY_LITE: usize = 2;
