use super::constants::*;

/// `WheelEvent.deltaMode` values.
pub const DELTA_PIXEL: u32 = 0;
pub const DELTA_LINE: u32 = 1;
pub const DELTA_PAGE: u32 = 2;

/// Normalize a wheel delta to pixels and clamp device spikes.
#[inline]
pub fn normalize_wheel(delta_y: f64, delta_mode: u32, viewport_h: f64) -> f64 {
    let delta = match delta_mode {
        DELTA_LINE => delta_y * WHEEL_LINE_PX,
        DELTA_PAGE => delta_y * viewport_h,
        _ => delta_y,
    };
    if !delta.is_finite() {
        return 0.0;
    }
    delta.clamp(-WHEEL_SPIKE_MAX, WHEEL_SPIKE_MAX)
}

/// Signed step for a navigation key, if the key drives the timeline.
#[inline]
pub fn key_step(key: &str) -> Option<f64> {
    match key {
        "ArrowDown" | "PageDown" | " " => Some(KEY_STEP),
        "ArrowUp" | "PageUp" => Some(-KEY_STEP),
        _ => None,
    }
}

#[inline]
pub fn clamp_event_delta(delta: f64, max: f64) -> f64 {
    if !delta.is_finite() {
        return 0.0;
    }
    delta.clamp(-max, max)
}

/// Timeline units for a clamped pixel-ish delta.
#[inline]
pub fn timeline_advance(delta: f64, max: f64) -> f64 {
    clamp_event_delta(delta, max) * TIMELINE_PER_WHEEL
}

/// Everything that can move the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Already normalized wheel delta (pixels).
    Wheel(f64),
    /// Vertical drag delta, before the touch multiplier.
    TouchDrag(f64),
    /// Synthetic delta fed by touch inertia (multiplier already applied).
    Inertia(f64),
    Key(f64),
}

/// Where a touch gesture began, as far as the timeline cares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchOrigin {
    #[default]
    Background,
    /// Started on the nav: never drives the timeline.
    Nav,
    /// Started inside the horizontal card scroller.
    Scroller,
}

/// Per-gesture touch bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct TouchGesture {
    last: Option<(f64, f64)>,
    origin: TouchOrigin,
    velocity: f64,
    accum_dx: f64,
    accum_dy: f64,
}

impl TouchGesture {
    pub fn begin(&mut self, x: f64, y: f64, origin: TouchOrigin) {
        *self = Self {
            last: Some((x, y)),
            origin,
            ..Self::default()
        };
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    /// Returns the vertical delta to feed the timeline, or `None` when the
    /// move belongs to someone else (nav, horizontal card scroll).
    pub fn update(&mut self, x: f64, y: f64) -> Option<f64> {
        let (lx, ly) = self.last?;
        if self.origin == TouchOrigin::Nav {
            return None;
        }
        let dy = ly - y;
        let dx = lx - x;
        self.accum_dx += dx;
        self.accum_dy += dy;
        self.velocity = TOUCH_VELOCITY_KEEP * self.velocity + (1.0 - TOUCH_VELOCITY_KEEP) * dy;
        if self.origin == TouchOrigin::Scroller && dx.abs() >= dy.abs() {
            return None;
        }
        self.last = Some((x, y));
        Some(dy)
    }

    /// Finish the gesture; yields inertia when the release should coast.
    pub fn end(&mut self, multiplier: f64) -> Option<Inertia> {
        self.last.take()?;
        match self.origin {
            TouchOrigin::Nav => None,
            TouchOrigin::Scroller if self.accum_dx.abs() >= self.accum_dy.abs() => None,
            _ => Inertia::launch(self.velocity * multiplier),
        }
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

/// Exponentially decaying velocity fed back as synthetic deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inertia {
    velocity: f64,
}

impl Inertia {
    /// `None` when the release is too slow to coast at all.
    pub fn launch(velocity: f64) -> Option<Self> {
        (velocity.abs() > INERTIA_MIN_VELOCITY).then_some(Self { velocity })
    }

    /// Delta for this frame; `None` once the motion has died out.
    pub fn step(&mut self) -> Option<f64> {
        if self.velocity.abs() <= INERTIA_MIN_VELOCITY {
            return None;
        }
        let v = self.velocity;
        self.velocity *= INERTIA_FRICTION;
        Some(v)
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}
