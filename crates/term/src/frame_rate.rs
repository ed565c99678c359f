/// Average frame rate over fixed reporting windows.
#[derive(Debug, Clone)]
pub struct FrameRateCounter {
    window_ms: u64,
    window_start_ms: Option<u64>,
    frames: u32,
}

impl FrameRateCounter {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            window_start_ms: None,
            frames: 0,
        }
    }

    /// Count one frame drawn at `now_ms`.
    ///
    /// Returns the average frames per second once a full window has passed,
    /// then starts the next window.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let Some(start) = self.window_start_ms else {
            self.window_start_ms = Some(now_ms);
            return None;
        };

        self.frames += 1;
        let elapsed = now_ms.saturating_sub(start);
        if elapsed < self.window_ms {
            return None;
        }

        let fps = f64::from(self.frames) * 1000.0 / elapsed as f64;
        self.window_start_ms = Some(now_ms);
        self.frames = 0;
        Some(fps)
    }
}
