/// Frame timing for the host loop
///
/// Measures the wall-clock time between frames and hands it to input
/// bindings as their delta time.
use std::time::{Duration, Instant};

/// Longest frame reported, in seconds
///
/// A stalled window (dragging, breakpoints) would otherwise fire a burst of
/// repeats on the next update.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Frame timing state
pub struct FrameTimer {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the timer started
    start_time: Instant,

    /// Current frame number
    frame_count: u64,

    /// Seconds between the last two frames
    delta_time: f32,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            start_time: now,
            frame_count: 0,
            delta_time: 0.0,
        }
    }

    /// Begin a new frame, returns the seconds since the previous one
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.delta_time = frame_time.as_secs_f32().min(MAX_FRAME_DELTA);
        self.delta_time
    }

    /// Get the delta time of the current frame (in seconds)
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
