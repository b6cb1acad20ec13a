//! Time facilities for the animation loop.
//!
//! Transitions are timed in whole milliseconds since the session started.
//! The [`Clock`] trait is the only thing the core reads; [`Time`] is the
//! wall-clock implementation driven by the frame loop and [`ManualClock`]
//! is a hand-stepped clock for tests and headless replays.
//!
//! # Example
//!
//! ```ignore
//! use tetra_orbit::time::{Clock, Time};
//!
//! let mut time = Time::new();
//!
//! // In your frame loop:
//! time.advance();
//!
//! println!("Elapsed: {} ms", time.now_ms());
//! println!("Frame: {}", time.frame());
//! println!("FPS: {:.1}", time.fps());
//! ```

use std::time::{Duration, Instant};

/// Milliseconds since session start.
pub type Millis = u64;

/// Monotonic millisecond source.
pub trait Clock {
    /// Milliseconds since the session started. Never decreases.
    fn now_ms(&self) -> Millis;

    /// Called once at the start of every frame, before objects update.
    fn advance(&mut self) {}
}

/// Wall-clock time tracking for the frame loop.
///
/// Provides elapsed milliseconds, delta time, frame counting and FPS.
/// Elapsed time is accumulated from scaled frame deltas, so changing the time
/// scale never moves the clock backwards.
#[derive(Debug)]
pub struct Time {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Accumulated (scaled) elapsed time.
    elapsed: Duration,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Whether time is paused.
    paused: bool,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            elapsed: Duration::ZERO,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_ms, delta_secs)` for convenience.
    pub fn update(&mut self) -> (Millis, f32) {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.paused {
            self.delta_secs = 0.0;
            return (self.now_ms(), self.delta_secs);
        }

        // Saturate instead of panicking when a huge scale overflows Duration
        let scaled = Duration::try_from_secs_f32(raw_delta.as_secs_f32() * self.time_scale)
            .unwrap_or_else(|_| {
                log::warn!("scaled frame delta overflows, saturating (scale {})", self.time_scale);
                Duration::MAX
            });
        self.delta_secs = scaled.as_secs_f32();
        self.elapsed = self.elapsed.saturating_add(scaled);

        self.frame_count += 1;

        // Update FPS periodically
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.now_ms(), self.delta_secs)
    }

    /// Time since last frame in seconds (delta time).
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Pause time progression.
    ///
    /// While paused, `delta()` returns 0 and `now_ms()` stops increasing, so
    /// running transitions freeze where they are.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression after pausing.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() {
            scale.max(0.0)
        } else {
            log::warn!("time scale {scale} is not finite, using 1.0");
            1.0
        };
    }

    /// Elapsed time as a Duration.
    #[inline]
    pub fn elapsed_duration(&self) -> Duration {
        self.elapsed
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Time {
    fn now_ms(&self) -> Millis {
        Millis::try_from(self.elapsed.as_millis()).unwrap_or(Millis::MAX)
    }

    fn advance(&mut self) {
        self.update();
    }
}

/// Hand-stepped clock.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Millis,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Millis) -> Self {
        Self { now }
    }

    /// Move the clock to `now`. Earlier values are ignored.
    pub fn set(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    pub fn advance_by(&mut self, ms: Millis) {
        self.now = self.now.saturating_add(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now
    }
}
