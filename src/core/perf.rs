// Length of one reporting window (ms)
pub const PERF_WINDOW_MS: f64 = 1000.0;

/// Summary of one reporting window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerfSummary {
    pub fps: f64,
    pub avg_render_ms: f64,
    pub max_render_ms: f64,
}

impl std::fmt::Display for PerfSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fps={:.1} render(ms): avg={:.2} max={:.2}",
            self.fps, self.avg_render_ms, self.max_render_ms
        )
    }
}

/// Rolling frame statistics, emitted once per window.
#[derive(Clone, Debug, Default)]
pub struct PerfWindow {
    window_start_ms: Option<f64>,
    frames: u32,
    total_render_ms: f64,
    max_render_ms: f64,
}

impl PerfWindow {
    /// Record a frame that took `render_ms`, finishing at `now_ms`.
    pub fn record(&mut self, render_ms: f64, now_ms: f64) -> Option<PerfSummary> {
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.frames += 1;
        self.total_render_ms += render_ms;
        self.max_render_ms = self.max_render_ms.max(render_ms);
        let elapsed = now_ms - start;
        if elapsed < PERF_WINDOW_MS {
            return None;
        }
        let summary = PerfSummary {
            fps: self.frames as f64 * 1000.0 / elapsed,
            avg_render_ms: self.total_render_ms / self.frames as f64,
            max_render_ms: self.max_render_ms,
        };
        *self = Self {
            window_start_ms: Some(now_ms),
            ..Self::default()
        };
        Some(summary)
    }
}
