// Frames between luminance samples while the index stays the same
pub const THEME_SAMPLE_INTERVAL: u32 = 6;
// Average luminance (0..255) at or above which the foreground turns dark
pub const DARK_FOREGROUND_THRESHOLD: f64 = 190.0;
// Progress after which the incoming layer counts as the visible one
pub const HANDOFF_PROGRESS: f64 = 0.4;
pub const SAMPLE_SIZE: u32 = 32;

/// Mean Rec. 709 luma of RGBA pixels.
pub fn mean_luminance(rgba: &[u8]) -> Option<f64> {
    let pixels = rgba.len() / 4;
    if pixels == 0 {
        return None;
    }
    let sum: f64 = rgba
        .chunks_exact(4)
        .map(|p| 0.2126 * p[0] as f64 + 0.7152 * p[1] as f64 + 0.0722 * p[2] as f64)
        .sum();
    Some(sum / pixels as f64)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Foreground {
    Light,
    Dark,
}

impl Foreground {
    pub fn for_luminance(lum: f64) -> Self {
        if lum >= DARK_FOREGROUND_THRESHOLD {
            Foreground::Dark
        } else {
            Foreground::Light
        }
    }

    pub fn css_color(self) -> &'static str {
        match self {
            Foreground::Light => "#ffffff",
            Foreground::Dark => "#000000",
        }
    }
}

/// Decides when to resample and which layer to sample.
#[derive(Clone, Debug, Default)]
pub struct ThemeSampler {
    countdown: u32,
    last_index: Option<usize>,
}

impl ThemeSampler {
    /// Layer to sample this frame, if any.
    pub fn poll(&mut self, index: usize, next: usize, progress: f64) -> Option<usize> {
        if self.countdown > 0 && self.last_index == Some(index) {
            self.countdown -= 1;
            return None;
        }
        self.last_index = Some(index);
        self.countdown = THEME_SAMPLE_INTERVAL;
        Some(if progress > HANDOFF_PROGRESS { next } else { index })
    }
}
