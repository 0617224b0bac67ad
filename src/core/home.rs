/// Body background class for each selectable home tile (by index).
pub const TILE_BACKGROUNDS: [Option<&str>; 8] = [
    Some("home-bg-nestbank"),
    Some("home-bg-medigo"),
    Some("home-bg-logofolio"),
    Some("home-bg-orion"),
    Some("home-bg-tom"),
    None,
    Some("home-bg-kinti"),
    Some("home-bg-kakakoala"),
];

/// Tiles that host a looping preview video, with its source.
pub const TILE_VIDEOS: [(usize, &str); 2] = [
    (3, "./assets/thumbnails/orion.mp4"),
    (6, "./assets/thumbnails/kinti.mp4"),
];

// Tilt applied to a selected tile under the pointer (degrees)
pub const MAX_TILT_DEG: f64 = 1.0;

#[inline]
pub fn tile_background(index: usize) -> Option<&'static str> {
    TILE_BACKGROUNDS.get(index).copied().flatten()
}

pub fn all_tile_backgrounds() -> impl Iterator<Item = &'static str> {
    TILE_BACKGROUNDS.iter().filter_map(|b| *b)
}

/// Roving-focus tab navigation. Returns the new active index for `key`.
pub fn next_tab(current: usize, key: &str, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    let current = current.min(last);
    match key {
        "ArrowRight" => Some(if current == last { 0 } else { current + 1 }),
        "ArrowLeft" => Some(if current == 0 { last } else { current - 1 }),
        "Home" => Some(0),
        "End" => Some(last),
        _ => None,
    }
}

/// Index of the tile whose centre is closest to the pointer.
pub fn nearest_tile(centers: &[(f64, f64)], x: f64, y: f64) -> Option<usize> {
    centers
        .iter()
        .enumerate()
        .map(|(i, (cx, cy))| (i, (x - cx).powi(2) + (y - cy).powi(2)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Tilt (rotateX, rotateY) in degrees for a pointer at `(u, v)` in the
/// tile's unit square.
#[inline]
pub fn tilt_degrees(u: f64, v: f64) -> (f64, f64) {
    let dx = (u - 0.5) * 2.0;
    let dy = (v - 0.5) * 2.0;
    (-dy * MAX_TILT_DEG, dx * MAX_TILT_DEG)
}
