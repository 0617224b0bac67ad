use super::constants::*;

/// What the page learned about the device at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    /// `(max-width: 600px)` matched.
    pub small_screen: bool,
    /// `navigator.connection.saveData` was set.
    pub save_data: bool,
    /// `(prefers-reduced-motion: reduce)` matched.
    pub reduced_motion: bool,
}

impl Profile {
    #[inline]
    pub fn lite(&self) -> bool {
        self.small_screen || self.save_data
    }
}

/// Runtime tuning for the zoom engine, derived from a [`Profile`].
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub zoom_max: f64,
    pub active_radius: usize,
    pub touch_multiplier: f64,
    pub max_event_delta: f64,
    pub video_defer_ms: f64,
    pub preload_concurrency: usize,
    pub warm_up: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl EngineConfig {
    pub fn for_profile(profile: Profile) -> Self {
        let small = profile.small_screen;
        Self {
            zoom_max: if profile.lite() {
                ZOOM_MAX_LITE.min(ZOOM_MAX)
            } else {
                ZOOM_MAX
            },
            active_radius: if small { ACTIVE_RADIUS_SMALL } else { ACTIVE_RADIUS },
            touch_multiplier: if small {
                TOUCH_DRAG_MULTIPLIER_SMALL
            } else {
                TOUCH_DRAG_MULTIPLIER
            },
            max_event_delta: if small { MAX_EVENT_DELTA_SMALL } else { MAX_EVENT_DELTA },
            video_defer_ms: if small { VIDEO_DEFER_MS_SMALL } else { VIDEO_DEFER_MS },
            preload_concurrency: if profile.lite() {
                PRELOAD_CONCURRENCY_LITE
            } else {
                PRELOAD_CONCURRENCY
            },
            // Small screens load on demand to avoid memory spikes
            warm_up: !small,
        }
    }
}
