use super::timeline::Segment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayAction {
    Play,
    Pause,
}

/// Bounding box of a layer in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Whether a displayed element actually overlaps the viewport.
#[inline]
pub fn intersects_viewport(r: Rect, vw: f64, vh: f64, displayed: bool) -> bool {
    let horizontally = r.right > 0.0 && r.left < vw;
    let vertically = r.bottom > 0.0 && r.top < vh;
    displayed && horizontally && vertically && r.width() > 0.0 && r.height() > 0.0
}

/// Play/pause decision for the video at `index`.
///
/// Current and next always play; anything on screen plays. While input is
/// still streaming in (`now_ms < defer_until_ms`) only on-screen videos may
/// run, so fast scrolling doesn't start decoders it will immediately leave.
pub fn video_action(
    index: usize,
    seg: &Segment,
    on_screen: bool,
    now_ms: f64,
    defer_until_ms: f64,
) -> PlayAction {
    if now_ms < defer_until_ms && !on_screen {
        return PlayAction::Pause;
    }
    if on_screen || index == seg.index || index == seg.next {
        PlayAction::Play
    } else {
        PlayAction::Pause
    }
}
