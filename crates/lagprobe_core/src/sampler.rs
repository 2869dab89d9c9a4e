//! Once-per-frame snapshot of pointer and display state
//!
//! Some hosts report the pointer in real time, so reading it twice in one
//! frame can give two answers depending on draw order. The sampler reads it
//! exactly once, together with the display geometry that is only safe to
//! query from the frame-production context.

use crate::presentation::{DisplayMode, Presentation};

/// Input layer's view of the pointer for the current frame.
pub trait PointerSource {
    /// Pointer position captured when the frame began, in window pixels.
    fn frame_cached_pointer_position(&self) -> (f32, f32);
}

/// Everything the overlay reads while drawing one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub cursor_x: f32,
    pub cursor_y: f32,
    pub display_width: i32,
    pub display_origin_x: i32,
    pub display_height: i32,
    pub refresh_rate_hz: f32,
    pub display_mode: DisplayMode,
}

impl Default for FrameSample {
    fn default() -> Self {
        Self {
            cursor_x: 0.0,
            cursor_y: 0.0,
            display_width: 0,
            display_origin_x: 0,
            display_height: 0,
            refresh_rate_hz: crate::time::FALLBACK_REFRESH_HZ,
            display_mode: DisplayMode::Windowed,
        }
    }
}

#[derive(Debug, Default)]
pub struct FrameSampler {
    current: FrameSample,
}

impl FrameSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take this frame's snapshot. Call before any drawing.
    pub fn sample<I, P>(&mut self, input: &I, presentation: &P) -> FrameSample
    where
        I: PointerSource + ?Sized,
        P: Presentation + ?Sized,
    {
        let (cursor_x, cursor_y) = input.frame_cached_pointer_position();
        let geometry = presentation.display_geometry();

        self.current = FrameSample {
            cursor_x,
            cursor_y,
            display_width: geometry.width,
            display_origin_x: geometry.origin_x,
            display_height: geometry.height,
            refresh_rate_hz: presentation.refresh_rate_hz(),
            display_mode: presentation.display_mode(),
        };
        self.current
    }

    /// Snapshot of the frame in progress.
    pub fn current(&self) -> &FrameSample {
        &self.current
    }
}
