//! Lagprobe Metrics - frame-time readout
//!
//! A smoothed FPS counter shown next to the probe overlay. It is a sanity
//! check on frame cadence, not a latency measurement.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use lagprobe_metrics::FrameTimer;
//!
//! let mut timer = FrameTimer::new();
//! loop {
//!     timer.tick();
//!     println!("{}", timer.readout());
//! }
//! ```
//!
//! Without the `metrics` feature the timer is a no-op and the readout is
//! empty.

// Built under test as well so its unit tests run without the feature; the
// public `FrameTimer` is still the stub unless `metrics` is on.
#[cfg(any(feature = "metrics", test))]
mod frame_timer;

#[cfg(feature = "metrics")]
pub use frame_timer::FrameTimer;

/// Weight of the newest frame in the running average.
pub const SMOOTHING: f64 = 0.1;

// ============================================================================
// No-op stub when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
pub struct FrameTimer;

#[cfg(not(feature = "metrics"))]
impl FrameTimer {
    pub fn new() -> Self { Self }
    pub fn tick(&mut self) {}
    pub fn record(&mut self, _delta: std::time::Duration) {}
    pub fn frame_time_ms(&self) -> f64 { 0.0 }
    pub fn fps(&self) -> f64 { 0.0 }
    pub fn readout(&self) -> String { String::new() }
}

#[cfg(not(feature = "metrics"))]
impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
