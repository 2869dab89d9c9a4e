//! Cursor control through the window toolkit.
//!
//! Used where the probe has no raw global-cursor API. The toolkit can only
//! warp the pointer relative to our own window, so desktop coordinates are
//! translated with the window origin the frame loop last observed. The
//! pointer position comes from the toolkit's pointer-moved events.

use crate::TOOLKIT_BACKEND;
use lagprobe_core::{CursorAdapter, ProbeError, ProbeResult};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use winit::dpi::PhysicalPosition;
use winit::window::Window;

pub struct ToolkitCursor {
    window: Arc<Window>,
    origin_x: AtomicI32,
    origin_y: AtomicI32,
    /// Last pointer position, window-local.
    pointer_x: AtomicI32,
    pointer_y: AtomicI32,
}

impl ToolkitCursor {
    /// Warp the pointer to the window center once; a refusal (e.g. a
    /// compositor that forbids warps) means the probe cannot run.
    pub fn connect(window: Arc<Window>) -> ProbeResult<Arc<Self>> {
        let (origin_x, origin_y) = window
            .inner_position()
            .map(|p| (p.x, p.y))
            .unwrap_or((0, 0));
        let size = window.inner_size();
        let center = (size.width as i32 / 2, size.height as i32 / 2);

        window
            .set_cursor_position(PhysicalPosition::new(center.0, center.1))
            .map_err(|e| ProbeError::cursor_unavailable(TOOLKIT_BACKEND, e.to_string()))?;

        Ok(Arc::new(Self {
            window,
            origin_x: AtomicI32::new(origin_x),
            origin_y: AtomicI32::new(origin_y),
            pointer_x: AtomicI32::new(center.0),
            pointer_y: AtomicI32::new(center.1),
        }))
    }

    fn origin(&self) -> (i32, i32) {
        (
            self.origin_x.load(Ordering::Acquire),
            self.origin_y.load(Ordering::Acquire),
        )
    }
}

/// Desktop coordinates to window-local ones.
pub fn to_window_local(desktop: (i32, i32), origin: (i32, i32)) -> (i32, i32) {
    (desktop.0 - origin.0, desktop.1 - origin.1)
}

pub fn to_desktop(local: (i32, i32), origin: (i32, i32)) -> (i32, i32) {
    (local.0 + origin.0, local.1 + origin.1)
}

impl CursorAdapter for ToolkitCursor {
    fn name(&self) -> &'static str {
        TOOLKIT_BACKEND
    }

    fn cursor_position(&self) -> (i32, i32) {
        let local = (
            self.pointer_x.load(Ordering::Acquire),
            self.pointer_y.load(Ordering::Acquire),
        );
        to_desktop(local, self.origin())
    }

    fn set_cursor_position(&self, x: i32, y: i32) {
        let (local_x, local_y) = to_window_local((x, y), self.origin());
        if let Err(err) = self
            .window
            .set_cursor_position(PhysicalPosition::new(local_x, local_y))
        {
            tracing::trace!(%err, "pointer warp rejected");
        }
    }

    fn observe_pointer(&self, window_x: i32, window_y: i32) {
        self.pointer_x.store(window_x, Ordering::Release);
        self.pointer_y.store(window_y, Ordering::Release);
    }

    fn observe_window_origin(&self, x: i32, y: i32) {
        self.origin_x.store(x, Ordering::Release);
        self.origin_y.store(y, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_round_trips_through_origin() {
        let origin = (200, 50);
        assert_eq!(to_window_local((260, 80), origin), (60, 30));
        assert_eq!(to_desktop((60, 30), origin), (260, 80));
    }

    #[test]
    fn points_left_of_window_go_negative() {
        assert_eq!(to_window_local((10, 10), (100, 0)), (-90, 10));
    }
}
