//! Global cursor control through user32.

use crate::last_known::LastKnownPosition;
use crate::WIN32_BACKEND;
use lagprobe_core::{CursorAdapter, ProbeError, ProbeResult};
use std::sync::Arc;
use windows_sys::Win32::Foundation::POINT;
use windows_sys::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

pub struct Win32Cursor {
    last: LastKnownPosition,
}

impl Win32Cursor {
    /// Confirm the cursor can be read and moved before handing it out.
    pub fn connect() -> ProbeResult<Arc<Self>> {
        let (x, y) = query().ok_or_else(|| ProbeError::cursor_unavailable(WIN32_BACKEND, "GetCursorPos failed"))?;
        if unsafe { SetCursorPos(x, y) } == 0 {
            return Err(ProbeError::cursor_unavailable(WIN32_BACKEND, "SetCursorPos failed"));
        }
        Ok(Arc::new(Self {
            last: LastKnownPosition::new((x, y)),
        }))
    }
}

fn query() -> Option<(i32, i32)> {
    let mut point = POINT { x: 0, y: 0 };
    if unsafe { GetCursorPos(&mut point) } == 0 {
        return None;
    }
    Some((point.x, point.y))
}

impl CursorAdapter for Win32Cursor {
    fn name(&self) -> &'static str {
        WIN32_BACKEND
    }

    fn cursor_position(&self) -> (i32, i32) {
        self.last.resolve(query())
    }

    fn set_cursor_position(&self, x: i32, y: i32) {
        unsafe {
            SetCursorPos(x, y);
        }
    }
}
