//! Status text and FPS readout drawn over the probe overlay.

use lagprobe_core::overlay::Color;
use lagprobe_render::batch::QuadBatch;
use lagprobe_render::text::{draw_text, text_width};

pub const TEXT_SCALE: f32 = 2.0;
pub const MARGIN: f32 = 10.0;
const PADDING: f32 = 4.0;
const BACKDROP: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.6,
};

/// Status block in the top-left corner.
pub fn draw_status(batch: &mut QuadBatch, text: &str) {
    if text.is_empty() {
        return;
    }
    draw_block(batch, MARGIN, MARGIN, text);
}

/// FPS readout in the top-right corner.
pub fn draw_fps(batch: &mut QuadBatch, readout: &str) {
    if readout.is_empty() {
        return;
    }
    let (surface_width, _) = batch.size();
    let x = surface_width - MARGIN - text_width(readout, TEXT_SCALE);
    draw_block(batch, x.max(MARGIN), MARGIN, readout);
}

fn draw_block(batch: &mut QuadBatch, x: f32, y: f32, text: &str) {
    let lines = text.lines().count() as f32;
    let height = lines * lagprobe_render::text::LINE_HEIGHT as f32 * TEXT_SCALE;
    batch.fill_rect(
        x - PADDING,
        y - PADDING,
        text_width(text, TEXT_SCALE) + 2.0 * PADDING,
        height + PADDING,
        BACKDROP,
    );
    draw_text(batch, x, y, TEXT_SCALE, text, Color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_draws_nothing() {
        let mut batch = QuadBatch::new(640, 480);
        draw_status(&mut batch, "");
        draw_fps(&mut batch, "");
        assert!(batch.is_empty());
    }

    #[test]
    fn fps_readout_draws_backdrop_first() {
        let mut batch = QuadBatch::new(640, 480);
        draw_fps(&mut batch, "16.7 ms (60 fps)");
        let vertices = batch.vertices();
        assert!(vertices.len() > 6);
        assert_eq!(vertices[0].color, BACKDROP.to_array());
    }
}
