//! Injected frame cost
//!
//! Sleeping on the frame thread simulates a CPU-bound frame so the overlay
//! can be checked at lower frame rates. Never call [`AdditionalLatency::apply`]
//! from the motion thread.

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdditionalLatency {
    extra_ms: u32,
}

impl AdditionalLatency {
    pub fn new(extra_ms: u32) -> Self {
        Self { extra_ms }
    }

    pub fn extra_ms(&self) -> u32 {
        self.extra_ms
    }

    pub fn increase(&mut self) -> u32 {
        self.extra_ms = self.extra_ms.saturating_add(1);
        self.extra_ms
    }

    /// Decrease by one millisecond, stopping at zero.
    pub fn decrease(&mut self) -> u32 {
        self.extra_ms = self.extra_ms.saturating_sub(1);
        self.extra_ms
    }

    /// Block the calling (frame) thread for the configured time.
    pub fn apply(&self) {
        if self.extra_ms > 0 {
            std::thread::sleep(Duration::from_millis(u64::from(self.extra_ms)));
        }
    }
}
