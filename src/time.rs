//! Timing for the simulation and the mode clock.
//!
//! A [`Time`] is a thin elapsed/delta/frame tracker over `std::time`.
//! The simulation keeps one as its mode clock: it restarts on every mode
//! transition, and its elapsed value is threaded into the config as
//! `mode_elapsed_time` each step. An optional fixed delta makes stepping
//! deterministic for tests and offline runs.

use std::time::Instant;

/// Elapsed/delta/frame tracking.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_update: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fixed_delta: Option<f32>,
}

impl Time {
    /// Create a tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_update: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
        }
    }

    /// Advance the clock by one frame. Returns `(elapsed, delta)`.
    ///
    /// With a fixed delta installed, elapsed time accumulates the fixed
    /// step instead of reading the wall clock.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        match self.fixed_delta {
            Some(dt) => {
                self.delta_secs = dt;
                self.elapsed_secs += dt;
            }
            None => {
                self.delta_secs = now.duration_since(self.last_update).as_secs_f32();
                self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
            }
        }
        self.last_update = now;
        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Restart the clock from zero, keeping the fixed-delta setting.
    pub fn restart(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_update = now;
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
    }

    /// Use a fixed per-frame delta instead of the wall clock.
    /// `None` returns to wall-clock timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Total elapsed seconds at the last update.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two updates.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames since creation or the last restart.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
