use super::constants::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelineError {
    #[error("timeline needs at least one layer")]
    NoLayers,
}

/// Part a layer plays in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Current,
    Next,
    Prev,
    Prev2,
    Parked,
}

/// Where the wrapped timeline sits: which segment and how far into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub loop_pos: f64,
    pub index: usize,
    pub progress: f64,
    pub next: usize,
    pub prev: usize,
    pub prev2: usize,
}

/// Numeric state for one layer; the render target turns it into styles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerPose {
    pub scale: f64,
    pub z: i32,
    pub visible: bool,
    pub role: Role,
}

impl Default for LayerPose {
    fn default() -> Self {
        Self {
            scale: START_SCALE,
            z: Z_BASE,
            visible: false,
            role: Role::Parked,
        }
    }
}

/// Wrap an unbounded position onto `[0, len)`.
#[inline]
pub fn wrap(position: f64, len: usize) -> f64 {
    let l = len as f64;
    let p = ((position % l) + l) % l;
    // Tiny negative inputs can round up to exactly `l`
    if p >= l || !p.is_finite() {
        0.0
    } else {
        p
    }
}

pub fn segment_at(position: f64, len: usize) -> Segment {
    let loop_pos = wrap(position, len);
    let index = (loop_pos.floor() as usize).min(len - 1);
    let progress = loop_pos - index as f64;
    Segment {
        loop_pos,
        index,
        progress,
        next: (index + 1) % len,
        prev: (index + len - 1) % len,
        prev2: (index + 2 * len - 2) % len,
    }
}

/// Scales for the four named roles at a given progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleScales {
    pub current: f64,
    pub next: f64,
    pub prev: f64,
    pub prev2: f64,
}

pub fn role_scales(progress: f64, zoom_max: f64) -> RoleScales {
    let decay = ((progress - TAIL_HOLD) / (1.0 - TAIL_HOLD)).max(0.0);
    let prev2_start = zoom_max + CONTINUE_GROWTH;
    RoleScales {
        current: 1.0 + progress * (zoom_max - 1.0),
        next: START_SCALE + progress * (1.0 - START_SCALE),
        prev: zoom_max + progress * CONTINUE_GROWTH,
        prev2: prev2_start * (1.0 - decay) + START_SCALE * decay,
    }
}

/// Circular distance between two indices on a ring of `len`.
#[inline]
pub fn ring_distance(a: usize, b: usize, len: usize) -> usize {
    let d = a.abs_diff(b) % len;
    d.min(len - d)
}

/// Fill `poses` (one per layer) for the given segment.
///
/// Roles are applied baseline, current, next, prev, prev2 so that on short
/// rings, where indices alias, the later role wins.
pub fn compose_frame(seg: &Segment, zoom_max: f64, active_radius: usize, poses: &mut [LayerPose]) {
    let len = poses.len();
    if len == 0 {
        return;
    }
    for (i, pose) in poses.iter_mut().enumerate() {
        *pose = LayerPose {
            visible: ring_distance(i, seg.index, len) <= active_radius,
            ..LayerPose::default()
        };
    }
    let s = role_scales(seg.progress, zoom_max);
    let mut assign = |i: usize, scale: f64, z: i32, role: Role| {
        let p = &mut poses[i];
        p.scale = scale;
        p.z = z;
        p.role = role;
    };
    assign(seg.index, s.current, Z_CURRENT, Role::Current);
    assign(seg.next, s.next, Z_NEXT, Role::Next);
    assign(seg.prev, s.prev, Z_PREV, Role::Prev);
    assign(seg.prev2, s.prev2, Z_PREV2, Role::Prev2);
}

/// Continuous position on the infinite circular track.
#[derive(Clone, Debug)]
pub struct Timeline {
    position: f64,
    target: f64,
    len: usize,
}

impl Timeline {
    pub fn new(len: usize) -> Result<Self, TimelineError> {
        if len == 0 {
            return Err(TimelineError::NoLayers);
        }
        Ok(Self {
            position: 0.0,
            target: 0.0,
            len,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Jump both position and target, leaving nothing to ease.
    pub fn jump_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
    }

    pub fn nudge(&mut self, amount: f64) {
        self.target += amount;
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        (self.target - self.position).abs()
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.distance() <= SETTLE_EPSILON
    }

    pub fn segment(&self) -> Segment {
        segment_at(self.position, self.len)
    }

    /// One easing step toward the target.
    pub fn tick(&mut self) -> Segment {
        self.position += (self.target - self.position) * SMOOTHING;
        self.segment()
    }
}
