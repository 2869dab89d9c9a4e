//! 5x7 bitmap text for the status HUD.

use crate::batch::QuadBatch;
use lagprobe_core::overlay::Color;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character, in font pixels.
pub const ADVANCE: u32 = GLYPH_WIDTH + 1;
/// Vertical advance per line, in font pixels.
pub const LINE_HEIGHT: u32 = GLYPH_HEIGHT + 3;

/// Rows of a glyph, top first; bit 4 is the leftmost column.
pub fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x1F],
        'J' => [0x01, 0x01, 0x01, 0x01, 0x11, 0x11, 0x0E],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        ';' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        '<' => [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02],
        '>' => [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        ' ' => [0x00; 7],
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}

/// Horizontal runs of set bits in one glyph row, as (first column, length).
fn row_runs(bits: u8) -> impl Iterator<Item = (u32, u32)> {
    let mut col = 0;
    std::iter::from_fn(move || {
        while col < GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                col += 1;
                continue;
            }
            let start = col;
            while col < GLYPH_WIDTH && bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                col += 1;
            }
            return Some((start, col - start));
        }
        None
    })
}

/// Draw `text` with its top-left corner at (`x`, `y`). `\n` starts a new line.
/// Returns the height of the block drawn, in window pixels.
pub fn draw_text(batch: &mut QuadBatch, x: f32, y: f32, scale: f32, text: &str, color: Color) -> f32 {
    let mut line_y = y;
    for line in text.lines() {
        let mut pen_x = x;
        for ch in line.chars() {
            for (row, bits) in glyph(ch).iter().enumerate() {
                for (col, len) in row_runs(*bits) {
                    batch.fill_rect(
                        pen_x + col as f32 * scale,
                        line_y + row as f32 * scale,
                        len as f32 * scale,
                        scale,
                        color,
                    );
                }
            }
            pen_x += ADVANCE as f32 * scale;
        }
        line_y += LINE_HEIGHT as f32 * scale;
    }
    line_y - y
}

/// Width of the widest line of `text`, in window pixels.
pub fn text_width(text: &str, scale: f32) -> f32 {
    let columns = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    columns as f32 * ADVANCE as f32 * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_uses_uppercase_glyphs() {
        assert_eq!(glyph('v'), glyph('V'));
    }

    #[test]
    fn runs_merge_adjacent_pixels() {
        let runs: Vec<_> = row_runs(0x1B).collect();
        assert_eq!(runs, vec![(0, 2), (3, 2)]);
        assert_eq!(row_runs(0x00).count(), 0);
        assert_eq!(row_runs(0x1F).collect::<Vec<_>>(), vec![(0, 5)]);
    }

    #[test]
    fn space_draws_nothing() {
        let mut batch = QuadBatch::new(100, 100);
        draw_text(&mut batch, 0.0, 0.0, 1.0, "   ", Color::WHITE);
        assert!(batch.is_empty());
    }

    #[test]
    fn block_height_counts_lines() {
        let mut batch = QuadBatch::new(100, 100);
        let height = draw_text(&mut batch, 0.0, 0.0, 2.0, "A\nB\nC", Color::WHITE);
        assert_eq!(height, 3.0 * LINE_HEIGHT as f32 * 2.0);
        assert!(!batch.is_empty());
    }

    #[test]
    fn width_follows_longest_line() {
        assert_eq!(text_width("ab\nabcd", 1.0), 4.0 * ADVANCE as f32);
        assert_eq!(text_width("", 3.0), 0.0);
    }
}
