//! Probe timing
//!
//! The motion thread ticks far faster than any display refreshes so its own
//! jitter stays well under one frame.

use std::time::Duration;

/// Sleep between motion updates (~1 ms).
pub const MOTION_TICK: Duration = Duration::from_millis(1);

/// Refresh rate assumed when the host cannot report one.
pub const FALLBACK_REFRESH_HZ: f32 = 60.0;

/// Duration of one display refresh in milliseconds.
pub fn frame_interval_ms(refresh_rate_hz: f32) -> f32 {
    if refresh_rate_hz > 0.0 {
        1000.0 / refresh_rate_hz
    } else {
        0.0
    }
}

/// Horizontal distance the cursor travels during one display refresh.
pub fn pixels_per_frame(velocity_px_per_ms: f32, refresh_rate_hz: f32) -> f32 {
    velocity_px_per_ms * frame_interval_ms(refresh_rate_hz)
}

/// Frame rate cap in frames per second; `None` means uncapped.
pub fn frame_cap_interval(cap_fps: Option<u32>) -> Option<Duration> {
    match cap_fps {
        Some(fps) if fps > 0 => Some(Duration::from_secs_f64(1.0 / fps as f64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_per_frame_at_60hz() {
        let ppf = pixels_per_frame(2.0, 60.0);
        assert!((ppf - 33.333).abs() < 0.01, "got {ppf}");
    }

    #[test]
    fn zero_refresh_draws_no_spacing() {
        assert_eq!(pixels_per_frame(2.0, 0.0), 0.0);
    }

    #[test]
    fn cap_interval() {
        assert_eq!(frame_cap_interval(None), None);
        assert_eq!(frame_cap_interval(Some(0)), None);
        let interval = frame_cap_interval(Some(120)).unwrap();
        assert!((interval.as_secs_f64() - 1.0 / 120.0).abs() < 1e-9);
    }
}
