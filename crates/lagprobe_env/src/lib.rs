//! Lagprobe Environment
//!
//! Host detection and the platform-specific cursor backends.

pub mod host;
pub mod last_known;
pub mod toolkit;
#[cfg(target_os = "windows")]
pub mod win32;

use host::HostPlatform;
use lagprobe_core::cursor::{select_backend, BackendCandidate, CursorAdapter};
use lagprobe_core::ProbeResult;
use std::sync::Arc;
use winit::window::Window;

pub const WIN32_BACKEND: &str = "win32";
pub const TOOLKIT_BACKEND: &str = "toolkit";

/// Every backend this build knows about, flagged by whether `host` matches it.
pub fn cursor_candidates(host: HostPlatform, window: &Arc<Window>) -> Vec<BackendCandidate> {
    let window = Arc::clone(window);
    vec![
        BackendCandidate::new(WIN32_BACKEND, host.is_windows, connect_win32),
        BackendCandidate::new(TOOLKIT_BACKEND, host.is_linux, move || {
            toolkit::ToolkitCursor::connect(window).map(|c| c as Arc<dyn CursorAdapter>)
        }),
    ]
}

/// Detect the host and connect its cursor backend. Failure is fatal.
pub fn connect_cursor(window: &Arc<Window>) -> ProbeResult<Arc<dyn CursorAdapter>> {
    let host = HostPlatform::detect();
    tracing::debug!(?host, "host platform");
    select_backend(cursor_candidates(host, window))
}

#[cfg(target_os = "windows")]
fn connect_win32() -> ProbeResult<Arc<dyn CursorAdapter>> {
    win32::Win32Cursor::connect().map(|c| c as Arc<dyn CursorAdapter>)
}

#[cfg(not(target_os = "windows"))]
fn connect_win32() -> ProbeResult<Arc<dyn CursorAdapter>> {
    Err(lagprobe_core::ProbeError::cursor_unavailable(
        WIN32_BACKEND,
        "built without Win32 support",
    ))
}
