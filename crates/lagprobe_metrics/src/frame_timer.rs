//! Exponentially smoothed frame timing

use crate::SMOOTHING;
use std::time::{Duration, Instant};

pub struct FrameTimer {
    last_tick: Option<Instant>,
    smoothed_secs: f64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            smoothed_secs: 0.0,
        }
    }

    /// Mark the start of a frame; the first call only sets the reference.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_tick.replace(now) {
            self.record(now - last);
        }
    }

    pub fn record(&mut self, delta: Duration) {
        self.smoothed_secs += (delta.as_secs_f64() - self.smoothed_secs) * SMOOTHING;
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.smoothed_secs * 1000.0
    }

    pub fn fps(&self) -> f64 {
        if self.smoothed_secs > 0.0 {
            1.0 / self.smoothed_secs
        } else {
            0.0
        }
    }

    /// e.g. `16.7 ms (60 fps)`
    pub fn readout(&self) -> String {
        format!("{:.1} ms ({:.0} fps)", self.frame_time_ms(), self.fps())
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_steady_cadence() {
        let mut timer = FrameTimer::new();
        for _ in 0..200 {
            timer.record(Duration::from_micros(16_667));
        }
        assert!((timer.frame_time_ms() - 16.667).abs() < 0.01);
        assert!((timer.fps() - 60.0).abs() < 0.1);
        assert_eq!(timer.readout(), "16.7 ms (60 fps)");
    }

    #[test]
    fn single_sample_moves_a_tenth() {
        let mut timer = FrameTimer::new();
        timer.record(Duration::from_millis(10));
        assert!((timer.frame_time_ms() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn first_tick_records_nothing() {
        let mut timer = FrameTimer::new();
        timer.tick();
        assert_eq!(timer.fps(), 0.0);
    }
}
