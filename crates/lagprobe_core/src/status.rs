//! Status text shown in the corner of the probe window.

use crate::presentation::{AppliedSettings, DisplayMode};
use std::fmt;

/// Version strings of the machine and the stack the probe runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostInfo {
    pub os_version: String,
    pub runtime_version: String,
}

pub const COMMAND_LEGEND: &[&str] = &[
    "Up/Down: Change mouse pixels per ms",
    "Left/Right: Change additional frame time",
    "Tab: Change fullscreen type",
    "1-5: Select profile",
    "Space: Start moving mouse",
    "Esc: Stop moving mouse",
];

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub host: HostInfo,
    pub profile_name: String,
    pub applied: AppliedSettings,
    pub display_mode: DisplayMode,
    pub additional_frame_time_ms: u32,
    pub velocity_px_per_ms: f32,
    pub running: bool,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OS: {}", self.host.os_version)?;
        writeln!(f, "Runtime: {}", self.host.runtime_version)?;
        writeln!(f)?;
        writeln!(f, "Profile: {}", self.profile_name)?;
        writeln!(
            f,
            "VSync: {} ({})",
            if self.applied.vsync { "on" } else { "off" },
            self.applied.present_mode
        )?;
        writeln!(f, "Queued frames: {}", self.applied.queued_frames)?;
        match self.applied.frame_rate_cap {
            Some(fps) => writeln!(f, "Max FPS: {fps}")?,
            None => writeln!(f, "Max FPS: uncapped")?,
        }
        writeln!(f, "Display mode: {}", self.display_mode)?;
        writeln!(f)?;
        writeln!(f, "Additional frame time (ms): {}", self.additional_frame_time_ms)?;
        writeln!(f, "Mouse speed (px/ms): {:.2}", self.velocity_px_per_ms)?;
        writeln!(f, "Mouse motion: {}", if self.running { "running" } else { "stopped" })?;
        writeln!(f)?;
        for line in COMMAND_LEGEND {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_section() {
        let report = StatusReport {
            host: HostInfo {
                os_version: "Linux 6.8".into(),
                runtime_version: "lagprobe 0.1.0".into(),
            },
            profile_name: "Free; uncapped".into(),
            applied: AppliedSettings {
                vsync: false,
                present_mode: "Immediate".into(),
                queued_frames: 1,
                frame_rate_cap: None,
            },
            display_mode: DisplayMode::Windowed,
            additional_frame_time_ms: 4,
            velocity_px_per_ms: 1.0,
            running: true,
        };
        let text = report.to_string();
        assert!(text.contains("OS: Linux 6.8"));
        assert!(text.contains("Profile: Free; uncapped"));
        assert!(text.contains("VSync: off (Immediate)"));
        assert!(text.contains("Max FPS: uncapped"));
        assert!(text.contains("Display mode: Windowed"));
        assert!(text.contains("Additional frame time (ms): 4"));
        assert!(text.contains("Esc: Stop moving mouse"));
    }
}
