//! Frame-rate cap enforcement

use lagprobe_core::time::frame_cap_interval;
use std::time::Instant;
use winit::event_loop::ControlFlow;

/// Schedules redraws so frames start no more often than the cap allows.
#[derive(Debug, Default)]
pub struct FramePacer {
    next_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a frame went out at `now` under `cap_fps`.
    ///
    /// Deadlines advance on a fixed grid so wake-up jitter does not drift
    /// the rate. A frame that overran its slot makes the next one due at once.
    pub fn frame_presented(&mut self, cap_fps: Option<u32>, now: Instant) {
        self.next_frame = frame_cap_interval(cap_fps).map(|interval| match self.next_frame {
            Some(previous) if previous + interval > now => previous + interval,
            Some(_) => now,
            None => now + interval,
        });
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_frame.map_or(true, |deadline| now >= deadline)
    }

    pub fn next_frame(&self) -> Option<Instant> {
        self.next_frame
    }

    pub fn control_flow(&self) -> ControlFlow {
        match self.next_frame {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Poll,
        }
    }
}
