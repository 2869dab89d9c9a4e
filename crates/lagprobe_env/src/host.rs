//! Host platform detection and version strings.

use lagprobe_core::status::HostInfo;
use sysinfo::System;

/// Which cursor-capable platform families this host belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPlatform {
    pub is_windows: bool,
    pub is_linux: bool,
}

impl HostPlatform {
    pub fn detect() -> Self {
        Self {
            is_windows: cfg!(target_os = "windows"),
            is_linux: cfg!(target_os = "linux"),
        }
    }
}

/// OS version line for the status text.
pub fn os_version() -> String {
    let name = System::long_os_version().unwrap_or_else(|| std::env::consts::OS.to_string());
    match System::kernel_version() {
        Some(kernel) => format!("{name} (kernel {kernel})"),
        None => name,
    }
}

pub fn host_info(runtime_version: impl Into<String>) -> HostInfo {
    HostInfo {
        os_version: os_version(),
        runtime_version: runtime_version.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_matches_build_target() {
        let host = HostPlatform::detect();
        assert_eq!(host.is_windows, cfg!(target_os = "windows"));
        assert_eq!(host.is_linux, cfg!(target_os = "linux"));
        assert!(!(host.is_windows && host.is_linux));
    }

    #[test]
    fn os_version_is_not_empty() {
        assert!(!os_version().is_empty());
    }

    #[test]
    fn host_info_carries_runtime() {
        let info = host_info("lagprobe 0.1.0");
        assert_eq!(info.runtime_version, "lagprobe 0.1.0");
    }
}
