//! Lyon-backed draw surface for GPU hosts.
//!
//! Circles and line segments are tessellated on the CPU into a flat triangle
//! list (`x, y, r, g, b, a` per vertex) that a WebGPU host uploads as-is.
//! Text cannot be tessellated here, so `fill_text` calls are collected as
//! [`TextLabel`]s for the host to overlay.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::traits::{Color, DrawSurface, FontSpec, TextAlign};

/// Per-vertex data. 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(position: lyon::math::Point, color: Color) -> Self {
        Self {
            x: position.x,
            y: position.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// Text the host has to draw on top of the triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    pub font: FontSpec,
    pub align: TextAlign,
    pub color: Color,
}

struct FillCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.color)
    }
}

struct StrokeCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.color)
    }
}

/// Tessellating surface. `clear` starts a new frame.
pub struct VectorSurface {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
    labels: Vec<TextLabel>,
    tolerance: f32,
}

impl VectorSurface {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
            labels: Vec::new(),
            tolerance: 0.1,
        }
    }

    /// Drop the previous frame's triangles and labels.
    pub fn clear_frame(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    /// Vertex data as a flat float slice for upload.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Expand indexed geometry into the flat triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            self.vertices.push(self.geometry.vertices[*idx as usize]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(self.tolerance),
            &mut BuffersBuilder::new(&mut self.geometry, FillCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("fill tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(self.tolerance).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("stroke tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for VectorSurface {
    fn clear(&mut self, width: f32, height: f32, color: Color) {
        self.clear_frame();
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(width, 0.0));
        builder.line_to(point(width, height));
        builder.line_to(point(0.0, height));
        builder.close();
        let path = builder.build();
        self.fill_path(&path, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();
        self.fill_path(&path, color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if from == to {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.line_to(point(to.x, to.y));
        builder.end(false);
        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &FontSpec, align: TextAlign, color: Color) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            pos,
            font: font.clone(),
            align,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn clear_fills_two_triangles() {
        let mut surface = VectorSurface::new();
        surface.clear(800.0, 600.0, Color::BLACK);
        assert_eq!(surface.vertex_count(), 6);
        assert_eq!(surface.as_floats().len(), 6 * VectorVertex::FLOATS);
    }

    #[test]
    fn circle_and_line_produce_triangles() {
        let mut surface = VectorSurface::new();
        surface.fill_circle(Vec2::new(50.0, 50.0), 6.0, Color::WHITE);
        let after_circle = surface.vertex_count();
        assert!(after_circle > 0);
        assert_eq!(after_circle % 3, 0);

        surface.stroke_line(Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0, Color::WHITE);
        assert!(surface.vertex_count() > after_circle);
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        let mut surface = VectorSurface::new();
        surface.fill_circle(Vec2::ZERO, 0.0, Color::WHITE);
        surface.stroke_line(Vec2::ONE, Vec2::ONE, 1.0, Color::WHITE);
        assert_eq!(surface.vertex_count(), 0);
    }

    #[test]
    fn text_becomes_labels_and_clear_frame_resets() {
        let mut surface = VectorSurface::new();
        let font = FontSpec::new(12.0, "Orbitron");
        surface.fill_text("Sirius", Vec2::new(10.0, 20.0), &font, TextAlign::Center, Color::WHITE);
        assert_eq!(surface.labels().len(), 1);
        assert_eq!(surface.labels()[0].text, "Sirius");

        surface.clear_frame();
        assert!(surface.labels().is_empty());
        assert_eq!(surface.vertex_count(), 0);
    }
}
