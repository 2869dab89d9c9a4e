//! Presentation profiles
//!
//! Each profile is a vsync/queue/cap combination together with the latency,
//! in whole display frames, a correctly behaving pipeline should show. The
//! window differs between fullscreen (tearing possible) and windowed
//! (composited, never tears) presentation.

use crate::presentation::{DisplayMode, Presentation};
use serde::{Deserialize, Serialize};

/// Inclusive range of expected latency in frames.
///
/// Negative bounds are meaningful: below a tear line the cursor can show up
/// ahead of the zero-latency line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdealWindow {
    pub min: i32,
    pub max: i32,
}

impl IdealWindow {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, frames: i32) -> bool {
        frames >= self.min && frames <= self.max
    }
}

/// Frame-rate cap expressed relative to the display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRateCap {
    Uncapped,
    RefreshMultiple(u32),
}

impl FrameRateCap {
    pub fn resolve(self, refresh_rate_hz: f32) -> Option<u32> {
        match self {
            FrameRateCap::Uncapped => None,
            FrameRateCap::RefreshMultiple(n) => Some((refresh_rate_hz * n as f32).round() as u32),
        }
    }
}

/// The five selectable profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileKind {
    VsyncQueue2,
    VsyncQueue1,
    FreeCappedRefresh,
    FreeCappedDoubleRefresh,
    FreeUncapped,
}

/// Immutable catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub kind: ProfileKind,
    pub name: &'static str,
    pub vsync: bool,
    pub queued_frames: u32,
    pub frame_rate_cap: FrameRateCap,
    pub fullscreen_window: IdealWindow,
    pub windowed_window: IdealWindow,
}

impl Profile {
    pub fn ideal_window(&self, mode: DisplayMode) -> IdealWindow {
        if mode.is_fullscreen() {
            self.fullscreen_window
        } else {
            self.windowed_window
        }
    }
}

pub const CATALOGUE: [Profile; 5] = [
    Profile {
        kind: ProfileKind::VsyncQueue2,
        name: "VSync; queue 2 frames",
        vsync: true,
        queued_frames: 2,
        frame_rate_cap: FrameRateCap::Uncapped,
        fullscreen_window: IdealWindow::new(2, 2),
        windowed_window: IdealWindow::new(3, 3),
    },
    Profile {
        kind: ProfileKind::VsyncQueue1,
        name: "VSync; queue 1 frame",
        vsync: true,
        queued_frames: 1,
        frame_rate_cap: FrameRateCap::Uncapped,
        fullscreen_window: IdealWindow::new(1, 1),
        windowed_window: IdealWindow::new(2, 2),
    },
    Profile {
        kind: ProfileKind::FreeCappedRefresh,
        name: "Free; capped at refresh rate",
        vsync: false,
        queued_frames: 1,
        frame_rate_cap: FrameRateCap::RefreshMultiple(1),
        fullscreen_window: IdealWindow::new(-1, 1),
        windowed_window: IdealWindow::new(1, 2),
    },
    Profile {
        kind: ProfileKind::FreeCappedDoubleRefresh,
        name: "Free; capped at double refresh rate",
        vsync: false,
        queued_frames: 1,
        frame_rate_cap: FrameRateCap::RefreshMultiple(2),
        fullscreen_window: IdealWindow::new(-1, 1),
        windowed_window: IdealWindow::new(1, 2),
    },
    Profile {
        kind: ProfileKind::FreeUncapped,
        name: "Free; uncapped",
        vsync: false,
        queued_frames: 1,
        frame_rate_cap: FrameRateCap::Uncapped,
        fullscreen_window: IdealWindow::new(-1, 0),
        windowed_window: IdealWindow::new(1, 1),
    },
];

impl ProfileKind {
    pub const ALL: [ProfileKind; 5] = [
        ProfileKind::VsyncQueue2,
        ProfileKind::VsyncQueue1,
        ProfileKind::FreeCappedRefresh,
        ProfileKind::FreeCappedDoubleRefresh,
        ProfileKind::FreeUncapped,
    ];

    /// Profile bound to number key `slot` (1-based).
    pub fn from_slot(slot: u8) -> Option<Self> {
        Self::ALL.get(usize::from(slot).checked_sub(1)?).copied()
    }

    pub fn profile(self) -> &'static Profile {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        &CATALOGUE[index]
    }
}

/// Name shown before any profile has been picked.
pub const NO_PROFILE_NAME: &str = "<press number keys>";

/// Active profile plus whatever the host refused while applying it.
#[derive(Debug, Default)]
pub struct ProfileManager {
    active: Option<&'static Profile>,
    warnings: Vec<String>,
}

impl ProfileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&'static Profile> {
        self.active
    }

    /// Settings the host could not honor for the active profile.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn display_name(&self) -> String {
        let Some(profile) = self.active else {
            return NO_PROFILE_NAME.to_string();
        };
        let mut name = profile.name.to_string();
        for warning in &self.warnings {
            name.push_str(&format!(" [WARNING: {warning}]"));
        }
        name
    }

    /// Make `kind` active and push its settings to the host.
    pub fn select<P: Presentation + ?Sized>(&mut self, kind: ProfileKind, presentation: &mut P) -> &'static Profile {
        let profile = kind.profile();
        let mut warnings = Vec::new();

        if let Some(reason) = presentation.set_vsync(profile.vsync).warning() {
            warnings.push(reason.to_string());
        }
        if let Some(reason) = presentation.set_queued_frame_depth(profile.queued_frames).warning() {
            warnings.push(reason.to_string());
        }
        let cap = profile.frame_rate_cap.resolve(presentation.refresh_rate_hz());
        presentation.set_frame_rate_cap(cap);

        for warning in &warnings {
            tracing::warn!(profile = profile.name, "{warning}");
        }
        tracing::info!(profile = profile.name, ?cap, "profile applied");

        self.active = Some(profile);
        self.warnings = warnings;
        profile
    }

    /// Expected latency window for the active profile in `mode`.
    pub fn ideal_window(&self, mode: DisplayMode) -> Option<IdealWindow> {
        self.active.map(|p| p.ideal_window(mode))
    }
}

/// Advance `current` through `cycle`, skipping modes the host rejects.
///
/// Returns `current` unchanged when no other mode is supported.
pub fn next_display_mode(
    cycle: &[DisplayMode],
    current: DisplayMode,
    supported: impl Fn(DisplayMode) -> bool,
) -> DisplayMode {
    if cycle.is_empty() {
        return current;
    }
    let start = cycle.iter().position(|m| *m == current);
    for step in 1..=cycle.len() {
        let index = match start {
            Some(i) => (i + step) % cycle.len(),
            None => (step - 1) % cycle.len(),
        };
        let candidate = cycle[index];
        if supported(candidate) {
            return candidate;
        }
    }
    current
}

/// Cycle the host's display mode to the next supported one.
pub fn cycle_display_mode<P: Presentation + ?Sized>(presentation: &mut P) -> DisplayMode {
    let current = presentation.display_mode();
    let next = next_display_mode(&DisplayMode::CYCLE, current, |m| {
        presentation.supports_display_mode(m)
    });
    if next != current {
        presentation.set_display_mode(next);
        tracing::info!(from = %current, to = %next, "display mode changed");
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_table_matches_catalogue() {
        use DisplayMode::*;
        let expected = [
            (ProfileKind::VsyncQueue2, (2, 2), (3, 3)),
            (ProfileKind::VsyncQueue1, (1, 1), (2, 2)),
            (ProfileKind::FreeCappedRefresh, (-1, 1), (1, 2)),
            (ProfileKind::FreeCappedDoubleRefresh, (-1, 1), (1, 2)),
            (ProfileKind::FreeUncapped, (-1, 0), (1, 1)),
        ];
        for (kind, full, windowed) in expected {
            let profile = kind.profile();
            assert_eq!(profile.kind, kind);
            for mode in [FullscreenWindowed, ExclusiveFullscreen] {
                assert_eq!(profile.ideal_window(mode), IdealWindow::new(full.0, full.1), "{kind:?}");
            }
            assert_eq!(profile.ideal_window(Windowed), IdealWindow::new(windowed.0, windowed.1), "{kind:?}");
        }
    }

    #[test]
    fn slots_map_to_profiles() {
        assert_eq!(ProfileKind::from_slot(1), Some(ProfileKind::VsyncQueue2));
        assert_eq!(ProfileKind::from_slot(5), Some(ProfileKind::FreeUncapped));
        assert_eq!(ProfileKind::from_slot(0), None);
        assert_eq!(ProfileKind::from_slot(6), None);
    }

    #[test]
    fn caps_resolve_against_refresh() {
        assert_eq!(FrameRateCap::Uncapped.resolve(144.0), None);
        assert_eq!(FrameRateCap::RefreshMultiple(1).resolve(60.0), Some(60));
        assert_eq!(FrameRateCap::RefreshMultiple(2).resolve(60.0), Some(120));
    }

    #[test]
    fn fractional_refresh_rounds_to_nearest() {
        assert_eq!(FrameRateCap::RefreshMultiple(1).resolve(59.94), Some(60));
        assert_eq!(FrameRateCap::RefreshMultiple(2).resolve(59.94), Some(120));
        assert_eq!(FrameRateCap::RefreshMultiple(1).resolve(143.856), Some(144));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = IdealWindow::new(-1, 1);
        assert!(window.contains(-1));
        assert!(window.contains(1));
        assert!(!window.contains(2));
        assert!(!window.contains(-2));
    }

    #[test]
    fn cycling_skips_unsupported_mode() {
        let cycle = [DisplayMode::FullscreenWindowed, DisplayMode::ExclusiveFullscreen, DisplayMode::Windowed];
        let next = next_display_mode(&cycle, DisplayMode::FullscreenWindowed, |m| {
            m != DisplayMode::ExclusiveFullscreen
        });
        assert_eq!(next, DisplayMode::Windowed);
    }

    #[test]
    fn cycling_wraps_around() {
        let next = next_display_mode(&DisplayMode::CYCLE, DisplayMode::Windowed, |_| true);
        assert_eq!(next, DisplayMode::FullscreenWindowed);
    }

    #[test]
    fn cycling_with_nothing_else_supported_stays_put() {
        let next = next_display_mode(&DisplayMode::CYCLE, DisplayMode::Windowed, |m| {
            m == DisplayMode::Windowed
        });
        assert_eq!(next, DisplayMode::Windowed);
    }

    #[test]
    fn unknown_current_mode_starts_at_the_front() {
        let cycle = [DisplayMode::Windowed, DisplayMode::FullscreenWindowed];
        let next = next_display_mode(&cycle, DisplayMode::ExclusiveFullscreen, |_| true);
        assert_eq!(next, DisplayMode::Windowed);
    }

    #[test]
    fn no_profile_shows_prompt() {
        let manager = ProfileManager::new();
        assert_eq!(manager.display_name(), NO_PROFILE_NAME);
        assert_eq!(manager.ideal_window(DisplayMode::Windowed), None);
    }
}
