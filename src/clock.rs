//! Frame clock for the render loop.

use std::time::Instant;

/// Wall-clock time since the loop started, never decreasing between ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    elapsed_s: f32,
    frame_count: u64,
    /// Exponential moving average of frames per second
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            elapsed_s: 0.0,
            frame_count: 0,
            fps: 0.0,
        }
    }

    /// Advance to the current frame and return the elapsed seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_tick).as_secs_f32();
        if dt > 0.0 {
            let instant_fps = 1.0 / dt;
            self.fps = if self.frame_count == 0 {
                instant_fps
            } else {
                0.9 * self.fps + 0.1 * instant_fps
            };
        }
        self.last_tick = now.max(self.last_tick);

        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        self.elapsed_s = self.elapsed_s.max(elapsed);
        self.frame_count += 1;
        self.elapsed_s
    }

    pub fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
