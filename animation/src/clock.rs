//! Document time sources.
//!
//! Animations are evaluated at milliseconds elapsed since a restart point. Interactive rendering
//! reads the wall clock, headless rendering (still frames, exports) advances a virtual clock by
//! hand.

use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

pub trait Clock: fmt::Debug {
    /// Sets the zero point to now.
    fn restart(&mut self);

    /// Milliseconds since the zero point.
    fn elapsed(&self) -> u64;

    /// Jumps `delta` milliseconds ahead.
    fn advance_by(&mut self, delta: i64);
}

/// Reads real time.
///
/// Advancing it moves the zero point into the past, the system clock stays untouched.
#[derive(Debug)]
pub struct WallClock {
    start: Instant,
    /// Milliseconds skipped by [`Clock::advance_by`] since the last restart.
    offset: i64,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: 0,
        }
    }
}

impl Clock for WallClock {
    fn restart(&mut self) {
        self.start = Instant::now();
        self.offset = 0;
    }

    fn elapsed(&self) -> u64 {
        let real = i64::try_from(self.start.elapsed().as_millis()).unwrap_or(i64::MAX);
        real.saturating_add(self.offset).max(0) as u64
    }

    fn advance_by(&mut self, delta: i64) {
        self.offset = self.offset.saturating_add(delta);
    }
}

/// A counter that only moves when advanced.
#[derive(Debug, Default)]
pub struct VirtualClock {
    elapsed: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for VirtualClock {
    fn restart(&mut self) {
        self.elapsed = 0;
    }

    fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Negative deltas are ignored, virtual time never runs backwards.
    fn advance_by(&mut self, delta: i64) {
        self.elapsed = self.elapsed.saturating_add(delta.max(0) as u64);
    }
}
