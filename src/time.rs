//! Frame timing for the render loop.
//!
//! The frame driver calls [`Time::update`] once per redraw and hands
//! [`Time::elapsed`] to [`Scene::tick`](crate::Scene::tick). The effect itself
//! advances per frame, not per second; wall-clock time only feeds the ambient
//! wave phase and the FPS readout.
//!
//! ```ignore
//! let mut time = Time::new();
//!
//! // In the redraw handler:
//! time.update();
//! scene.tick(time.elapsed());
//! ```

use std::time::{Duration, Instant};

/// Wall-clock timing across frames.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    /// Seconds since start, cached at the last update.
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    /// Frames per second, recomputed every `fps_update_interval`.
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    fps_refreshed: bool,
}

impl Time {
    /// Create a tracker starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            fps_refreshed: false,
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> (f32, f32) {
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        self.fps_refreshed = fps_elapsed >= self.fps_update_interval;
        if self.fps_refreshed {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two updates.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the last update recomputed [`fps`](Self::fps).
    #[inline]
    pub fn fps_refreshed(&self) -> bool {
        self.fps_refreshed
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
