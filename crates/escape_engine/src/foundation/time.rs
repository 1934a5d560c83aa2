//! Frame clock
//!
//! The game is frame-driven: every frame the caller ticks the clock and hands
//! the returned delta to the play mode as its `elapsed` value.

use std::time::Instant;

/// Wall-clock frame timer
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Instant,
    delta: f32,
    total: f32,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start the clock now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start the clock at a given instant
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_tick: start,
            delta: 0.0,
            total: 0.0,
            frames: 0,
        }
    }

    /// Mark a new frame and return the seconds since the previous one
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Mark a new frame at `now`. An instant earlier than the last tick
    /// counts as zero elapsed time.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.total += self.delta;
        self.last_tick = now.max(self.last_tick);
        self.frames += 1;
        self.delta
    }

    /// Seconds between the last two ticks
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds accumulated over all ticks
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Number of ticks so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
