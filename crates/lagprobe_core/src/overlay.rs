//! Frame-offset reference lines
//!
//! Line `i` marks where the cursor would be drawn if it were `i` frames
//! late. The tolerance band marks the lines the active profile is expected
//! to land on.

use crate::profile::IdealWindow;
use crate::sampler::FrameSample;
use crate::time::pixels_per_frame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 0.92, 0.016);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Drawing subsystem of the host.
pub trait Canvas {
    /// One-pixel-wide vertical line starting at `y_top`.
    fn draw_vertical_line(&mut self, x: f32, y_top: f32, length: f32, color: Color);
}

/// Colors of lines 0, 1, 2, ... frames of latency.
pub const LINE_COLORS: [Color; 5] = [Color::WHITE, Color::GREEN, Color::YELLOW, Color::RED, Color::MAGENTA];

/// Geometry of the tolerance band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Lowest frame offset considered; negative offsets are only banded.
    pub first_offset: i32,
    pub band_height: f32,
    pub band_border: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            first_offset: -1,
            band_height: 40.0,
            band_border: 2.0,
        }
    }
}

pub struct OverlayRenderer {
    style: OverlayStyle,
    line_colors: Vec<Color>,
    band_color: Color,
    border_color: Color,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            style,
            line_colors: LINE_COLORS.to_vec(),
            band_color: Color::GRAY,
            border_color: Color::BLACK,
        }
    }

    /// Frame offsets this renderer considers, lowest first.
    pub fn offsets(&self) -> std::ops::Range<i32> {
        self.style.first_offset.min(0)..self.line_colors.len() as i32
    }

    pub fn draw<C: Canvas + ?Sized>(
        &self,
        sample: &FrameSample,
        velocity_px_per_ms: f32,
        window: Option<IdealWindow>,
        canvas: &mut C,
    ) {
        let spacing = pixels_per_frame(velocity_px_per_ms, sample.refresh_rate_hz);
        let height = sample.display_height as f32;

        for offset in self.offsets() {
            let x = sample.cursor_x + offset as f32 * spacing;

            if let Some(color) = usize::try_from(offset).ok().and_then(|i| self.line_colors.get(i)) {
                canvas.draw_vertical_line(x, 0.0, height, *color);
            }

            if window.is_some_and(|w| w.contains(offset)) {
                self.draw_band(x, sample.cursor_y, canvas);
            }
        }
    }

    fn draw_band<C: Canvas + ?Sized>(&self, x: f32, cursor_y: f32, canvas: &mut C) {
        let top = cursor_y - self.style.band_height / 2.0;
        let bottom = top + self.style.band_height;
        canvas.draw_vertical_line(x, top, self.style.band_height, self.band_color);
        canvas.draw_vertical_line(x, top, self.style.band_border, self.border_color);
        canvas.draw_vertical_line(x, bottom - self.style.band_border, self.style.band_border, self.border_color);
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::DisplayMode;

    #[derive(Default)]
    struct RecordingCanvas {
        lines: Vec<(f32, f32, f32, Color)>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_vertical_line(&mut self, x: f32, y_top: f32, length: f32, color: Color) {
            self.lines.push((x, y_top, length, color));
        }
    }

    fn sample() -> FrameSample {
        FrameSample {
            cursor_x: 500.0,
            cursor_y: 300.0,
            display_width: 1920,
            display_origin_x: 0,
            display_height: 1080,
            refresh_rate_hz: 100.0,
            display_mode: DisplayMode::Windowed,
        }
    }

    #[test]
    fn draws_five_full_height_lines_without_window() {
        let mut canvas = RecordingCanvas::default();
        OverlayRenderer::default().draw(&sample(), 1.0, None, &mut canvas);

        // 1 px/ms at 100 Hz = 10 px per frame
        let xs: Vec<f32> = canvas.lines.iter().map(|l| l.0).collect();
        assert_eq!(xs, vec![500.0, 510.0, 520.0, 530.0, 540.0]);
        assert!(canvas.lines.iter().all(|l| l.1 == 0.0 && l.2 == 1080.0));
        let colors: Vec<Color> = canvas.lines.iter().map(|l| l.3).collect();
        assert_eq!(colors, LINE_COLORS.to_vec());
    }

    #[test]
    fn band_covers_window_including_negative_offset() {
        let mut canvas = RecordingCanvas::default();
        OverlayRenderer::default().draw(&sample(), 1.0, Some(IdealWindow::new(-1, 0)), &mut canvas);

        let bands: Vec<&(f32, f32, f32, Color)> =
            canvas.lines.iter().filter(|l| l.3 == Color::GRAY).collect();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].0, 490.0);
        assert_eq!(bands[1].0, 500.0);
        // centered on the cursor
        assert_eq!(bands[0].1, 280.0);
        assert_eq!(bands[0].2, 40.0);

        let ticks: Vec<&(f32, f32, f32, Color)> =
            canvas.lines.iter().filter(|l| l.3 == Color::BLACK).collect();
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[0].1, 280.0);
        assert_eq!(ticks[1].1, 318.0);
        assert!(ticks.iter().all(|t| t.2 == 2.0));
    }

    #[test]
    fn no_line_for_baseline_offset() {
        let mut canvas = RecordingCanvas::default();
        OverlayRenderer::default().draw(&sample(), 1.0, Some(IdealWindow::new(3, 3)), &mut canvas);
        assert!(canvas.lines.iter().all(|l| l.0 >= 500.0));
        assert_eq!(canvas.lines.len(), 5 + 3);
    }
}
