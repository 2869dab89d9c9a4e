//! Host presentation interface
//!
//! The probe configures vsync, frame queueing, frame-rate caps and
//! fullscreen handling through this trait. Engine vocabulary (present modes,
//! monitor video modes, ...) stays on the implementor's side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the probe window is composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Composited by the desktop; never tears.
    Windowed,
    /// Borderless window covering the monitor.
    FullscreenWindowed,
    /// Exclusive ownership of the output.
    ExclusiveFullscreen,
}

impl DisplayMode {
    /// Order in which the cycle command visits the modes.
    pub const CYCLE: [DisplayMode; 3] = [
        DisplayMode::FullscreenWindowed,
        DisplayMode::ExclusiveFullscreen,
        DisplayMode::Windowed,
    ];

    pub fn is_fullscreen(self) -> bool {
        !matches!(self, DisplayMode::Windowed)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayMode::Windowed => "Windowed",
            DisplayMode::FullscreenWindowed => "FullscreenWindowed",
            DisplayMode::ExclusiveFullscreen => "ExclusiveFullscreen",
        };
        f.write_str(name)
    }
}

/// Window size and placement, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayGeometry {
    pub width: i32,
    pub origin_x: i32,
    pub height: i32,
}

/// Result of asking the host to change a presentation setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingOutcome {
    Applied,
    /// The host kept running without honoring the request.
    Ignored { reason: String },
}

impl SettingOutcome {
    pub fn ignored(reason: impl Into<String>) -> Self {
        Self::Ignored {
            reason: reason.into(),
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            SettingOutcome::Applied => None,
            SettingOutcome::Ignored { reason } => Some(reason),
        }
    }
}

/// Raw settings the host actually runs with, for the status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSettings {
    pub vsync: bool,
    /// Host-specific name of the present mode in use.
    pub present_mode: String,
    pub queued_frames: u32,
    /// `None` when uncapped.
    pub frame_rate_cap: Option<u32>,
}

/// Presentation subsystem of the host engine.
pub trait Presentation {
    fn set_vsync(&mut self, enabled: bool) -> SettingOutcome;

    fn set_queued_frame_depth(&mut self, frames: u32) -> SettingOutcome;

    /// `None` removes the cap.
    fn set_frame_rate_cap(&mut self, fps: Option<u32>);

    fn set_display_mode(&mut self, mode: DisplayMode);

    fn display_mode(&self) -> DisplayMode;

    fn supports_display_mode(&self, mode: DisplayMode) -> bool;

    fn refresh_rate_hz(&self) -> f32;

    fn display_geometry(&self) -> DisplayGeometry;

    fn applied_settings(&self) -> AppliedSettings;
}
