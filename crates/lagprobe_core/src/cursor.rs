//! Platform cursor access
//!
//! The motion thread moves the real system cursor; the frame loop only ever
//! sees where the host's input layer thinks it is. Backends live in
//! `lagprobe_env`, this module only defines the seam and the one-time
//! backend selection.

use crate::error::{ProbeError, ProbeResult};
use std::sync::Arc;

/// Uniform get/set of the global cursor position, in desktop pixels.
///
/// Implementations must be callable from the motion thread while the frame
/// loop is running.
pub trait CursorAdapter: Send + Sync {
    /// Short backend name for logs and the status text.
    fn name(&self) -> &'static str;

    fn cursor_position(&self) -> (i32, i32);

    fn set_cursor_position(&self, x: i32, y: i32);

    /// Pointer position as reported by the window toolkit, in window pixels.
    /// Backends with direct access to the global cursor ignore it.
    fn observe_pointer(&self, _window_x: i32, _window_y: i32) {}

    /// Desktop position of the window's client area.
    fn observe_window_origin(&self, _x: i32, _y: i32) {}
}

type Connect = Box<dyn FnOnce() -> ProbeResult<Arc<dyn CursorAdapter>>>;

/// A cursor backend that may or may not apply to the current host.
pub struct BackendCandidate {
    pub name: &'static str,
    pub matched: bool,
    connect: Connect,
}

impl BackendCandidate {
    pub fn new<F>(name: &'static str, matched: bool, connect: F) -> Self
    where
        F: FnOnce() -> ProbeResult<Arc<dyn CursorAdapter>> + 'static,
    {
        Self {
            name,
            matched,
            connect: Box::new(connect),
        }
    }
}

/// Pick the single backend whose host detection matched and connect it.
///
/// Zero or several matches are configuration errors; so is a matched
/// backend that fails to connect.
pub fn select_backend(candidates: Vec<BackendCandidate>) -> ProbeResult<Arc<dyn CursorAdapter>> {
    let supported = candidates
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ");

    let mut matched: Vec<BackendCandidate> = candidates.into_iter().filter(|c| c.matched).collect();

    match matched.len() {
        0 => Err(ProbeError::UnsupportedPlatform { supported }),
        1 => {
            let candidate = matched.remove(0);
            tracing::info!(backend = candidate.name, "cursor backend selected");
            (candidate.connect)()
        }
        _ => Err(ProbeError::AmbiguousPlatform {
            matched: matched.iter().map(|c| c.name).collect(),
        }),
    }
}
