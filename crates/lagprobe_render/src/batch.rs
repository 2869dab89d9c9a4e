//! CPU-side quad batch
//!
//! Rectangles are given in window pixels (origin top-left, y down) and
//! projected to clip space as they are added.

use glam::{Mat4, Vec3};
use lagprobe_core::overlay::{Canvas, Color};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Width of lines drawn through [`Canvas`].
pub const LINE_WIDTH: f32 = 1.0;

pub struct QuadBatch {
    vertices: Vec<Vertex>,
    projection: Mat4,
    width: f32,
    height: f32,
}

impl QuadBatch {
    pub fn new(width: u32, height: u32) -> Self {
        let mut batch = Self {
            vertices: Vec::new(),
            projection: Mat4::IDENTITY,
            width: 0.0,
            height: 0.0,
        };
        batch.begin(width, height);
        batch
    }

    /// Clear the batch for a frame of the given surface size.
    pub fn begin(&mut self, width: u32, height: u32) {
        self.vertices.clear();
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
        self.projection = Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, -1.0, 1.0);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let color = color.to_array();
        let corner = |px: f32, py: f32| {
            let clip = self.projection.project_point3(Vec3::new(px, py, 0.0));
            Vertex {
                position: [clip.x, clip.y],
                color,
            }
        };
        let top_left = corner(x, y);
        let top_right = corner(x + w, y);
        let bottom_left = corner(x, y + h);
        let bottom_right = corner(x + w, y + h);

        self.vertices.extend_from_slice(&[
            top_left,
            bottom_left,
            top_right,
            top_right,
            bottom_left,
            bottom_right,
        ]);
    }
}

impl Canvas for QuadBatch {
    fn draw_vertical_line(&mut self, x: f32, y_top: f32, length: f32, color: Color) {
        self.fill_rect(x.floor(), y_top, LINE_WIDTH, length, color);
    }
}
