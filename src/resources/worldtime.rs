//! Fixed-timestep clock.
//!
//! [`WorldTime`] turns irregular display frames into uniform physics ticks.
//! Each frame the wall-clock delta is clamped (spiral-of-death guard),
//! scaled by `time_scale` and added to an accumulator. The loop then runs one
//! fixed step per [`FIXED_TIMESTEP`](crate::tuning::time::FIXED_TIMESTEP) of
//! accumulated time; each consumed step subtracts exactly one timestep so the
//! remainder carries into the next frame.
//!
//! Times are milliseconds unless a method says otherwise.

use log::warn;

use crate::tuning::time::{FIXED_TIMESTEP, MAX_FRAME_TIME};

/// Frame clock and fixed-step accumulator.
#[derive(Debug, Clone)]
pub struct WorldTime {
    last_time: Option<f64>,
    accumulator: f64,
    frame_count: u64,
    /// Clamped and scaled delta of the current frame.
    delta: f64,
    /// Sum of all scaled deltas since the last reset.
    elapsed: f64,
    alpha: f64,
    max_frame_time: f64,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldTime {
    pub fn new() -> Self {
        WorldTime {
            last_time: None,
            accumulator: 0.0,
            frame_count: 0,
            delta: 0.0,
            elapsed: 0.0,
            alpha: 0.0,
            max_frame_time: MAX_FRAME_TIME,
            time_scale: 1.0,
        }
    }

    /// Override the per-frame delta clamp.
    pub fn with_max_frame_time(mut self, max_frame_time: f64) -> Self {
        self.max_frame_time = max_frame_time;
        self
    }

    /// Start a frame at wall-clock time `now`.
    ///
    /// The first frame after construction or [`reset`](Self::reset) has a
    /// zero delta.
    pub fn begin_frame(&mut self, now: f64) {
        let raw_delta = match self.last_time {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        if raw_delta > self.max_frame_time {
            warn!(
                "Frame took {:.1}ms, clamping to {:.1}ms",
                raw_delta, self.max_frame_time
            );
        }
        self.delta = raw_delta.min(self.max_frame_time) * f64::from(self.time_scale);
        self.accumulator += self.delta;
        self.elapsed += self.delta;
        self.last_time = Some(now);
        self.frame_count += 1;
    }

    /// Enough time has accumulated for another fixed step.
    pub fn should_run_fixed_step(&self) -> bool {
        self.accumulator >= FIXED_TIMESTEP
    }

    /// Subtract one fixed timestep from the accumulator.
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= FIXED_TIMESTEP;
    }

    /// Interpolation factor between the last two fixed steps, for renderers.
    pub fn calculate_alpha(&mut self) {
        self.alpha = self.accumulator / FIXED_TIMESTEP;
    }

    /// Throw away unconsumed time (used while paused).
    pub fn discard_accumulated(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn delta_ms(&self) -> f64 {
        self.delta
    }

    /// Current frame delta in seconds, for variable-rate systems.
    pub fn delta_seconds(&self) -> f32 {
        Self::ms_to_seconds(self.delta) as f32
    }

    /// Fixed timestep in seconds, for fixed-rate systems.
    pub fn fixed_delta_seconds(&self) -> f32 {
        Self::ms_to_seconds(FIXED_TIMESTEP) as f32
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Forget all timing state. The time scale and frame clamp are kept.
    pub fn reset(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
        self.frame_count = 0;
        self.delta = 0.0;
        self.elapsed = 0.0;
        self.alpha = 0.0;
    }

    pub fn ms_to_seconds(ms: f64) -> f64 {
        ms / 1000.0
    }

    pub fn seconds_to_ms(seconds: f64) -> f64 {
        seconds * 1000.0
    }
}
