//! Window management
//!
//! Window creation and the mapping from probe display modes to winit
//! fullscreen states.

use lagprobe_core::DisplayMode;
use winit::monitor::{MonitorHandle, VideoModeHandle};
use winit::window::{Fullscreen, Window};

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub display_mode: DisplayMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lagprobe".to_string(),
            width: 1280,
            height: 720,
            display_mode: DisplayMode::FullscreenWindowed,
        }
    }
}

/// Create window attributes from config
///
/// The window always opens windowed; the presenter switches display mode
/// once the surface exists, since exclusive mode needs the backend known.
pub fn window_attributes(config: &WindowConfig) -> winit::window::WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
}

/// Size and refresh of a video mode, for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoModeKey {
    pub width: u32,
    pub height: u32,
    pub refresh_millihertz: u32,
    pub bit_depth: u16,
}

impl VideoModeKey {
    fn of(mode: &VideoModeHandle) -> Self {
        let size = mode.size();
        Self {
            width: size.width,
            height: size.height,
            refresh_millihertz: mode.refresh_rate_millihertz(),
            bit_depth: mode.bit_depth(),
        }
    }

    fn rank(&self) -> (u64, u32, u16) {
        (
            u64::from(self.width) * u64::from(self.height),
            self.refresh_millihertz,
            self.bit_depth,
        )
    }
}

/// Index of the largest mode, ties broken by refresh rate then bit depth.
pub fn best_video_mode(modes: &[VideoModeKey]) -> Option<usize> {
    modes
        .iter()
        .enumerate()
        .max_by_key(|(_, key)| key.rank())
        .map(|(index, _)| index)
}

pub fn exclusive_mode_for(monitor: &MonitorHandle) -> Option<VideoModeHandle> {
    let modes: Vec<VideoModeHandle> = monitor.video_modes().collect();
    let keys: Vec<VideoModeKey> = modes.iter().map(VideoModeKey::of).collect();
    best_video_mode(&keys).and_then(|index| modes.into_iter().nth(index))
}

/// Fullscreen state for `mode`. `None` both for windowed and for an
/// exclusive request the monitor cannot satisfy; callers check
/// [`DisplayMode::is_fullscreen`] to tell the two apart.
pub fn fullscreen_for(mode: DisplayMode, monitor: Option<MonitorHandle>) -> Option<Fullscreen> {
    match mode {
        DisplayMode::Windowed => None,
        DisplayMode::FullscreenWindowed => Some(Fullscreen::Borderless(monitor)),
        DisplayMode::ExclusiveFullscreen => monitor
            .as_ref()
            .and_then(exclusive_mode_for)
            .map(Fullscreen::Exclusive),
    }
}

/// Display mode the window is actually in.
pub fn display_mode_for(fullscreen: Option<&Fullscreen>) -> DisplayMode {
    match fullscreen {
        Some(Fullscreen::Exclusive(_)) => DisplayMode::ExclusiveFullscreen,
        Some(Fullscreen::Borderless(_)) => DisplayMode::FullscreenWindowed,
        None => DisplayMode::Windowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(width: u32, height: u32, hz: u32) -> VideoModeKey {
        VideoModeKey {
            width,
            height,
            refresh_millihertz: hz * 1000,
            bit_depth: 32,
        }
    }

    #[test]
    fn prefers_largest_then_fastest() {
        let modes = [key(1920, 1080, 60), key(2560, 1440, 60), key(2560, 1440, 144), key(1280, 720, 240)];
        assert_eq!(best_video_mode(&modes), Some(2));
    }

    #[test]
    fn no_modes_no_choice() {
        assert_eq!(best_video_mode(&[]), None);
    }

    #[test]
    fn windowed_is_not_fullscreen() {
        assert!(fullscreen_for(DisplayMode::Windowed, None).is_none());
        assert!(matches!(
            fullscreen_for(DisplayMode::FullscreenWindowed, None),
            Some(Fullscreen::Borderless(None))
        ));
        assert!(fullscreen_for(DisplayMode::ExclusiveFullscreen, None).is_none());
    }

    #[test]
    fn display_mode_follows_window_state() {
        assert_eq!(display_mode_for(None), DisplayMode::Windowed);
        assert_eq!(
            display_mode_for(Some(&Fullscreen::Borderless(None))),
            DisplayMode::FullscreenWindowed
        );
    }

    #[test]
    fn fullscreen_request_maps_back_to_its_mode() {
        let fullscreen = fullscreen_for(DisplayMode::FullscreenWindowed, None);
        assert_eq!(display_mode_for(fullscreen.as_ref()), DisplayMode::FullscreenWindowed);
        let windowed = fullscreen_for(DisplayMode::Windowed, None);
        assert_eq!(display_mode_for(windowed.as_ref()), DisplayMode::Windowed);
    }
}
