//! Glyph quad geometry
//!
//! Converts cached glyph metrics at a pen position into two triangles in
//! pixel space.
//!
//! # Layout Coordinate System
//!
//! - Origin (0, 0) is the bottom-left corner of the viewport
//! - +X axis points right, +Y axis points up
//! - The pen sits on the baseline

use crate::foundation::math::{utils, Mat4, Vec2};
use crate::render::Viewport;

use super::CachedGlyph;

/// Vertex for text rendering, laid out as one `vec4` attribute (xy + uv)
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct TextVertex {
    /// Position in pixels
    pub position: [f32; 2],
    /// Texture coordinates (0..1, v = 0 is the bitmap's top row)
    pub uv: [f32; 2],
}

impl TextVertex {
    const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { position: [x, y], uv: [u, v] }
    }
}

/// Build the six vertices (two triangles) for a glyph drawn at `pen`
///
/// `pen` already includes any shaping offset.
pub fn glyph_quad(pen: Vec2, glyph: &CachedGlyph) -> [TextVertex; 6] {
    let x_min = pen.x + glyph.left as f32;
    let y_min = pen.y + glyph.bottom as f32;
    let x_max = x_min + glyph.width as f32;
    let y_max = y_min + glyph.height as f32;

    [
        TextVertex::new(x_min, y_max, 0.0, 0.0),
        TextVertex::new(x_min, y_min, 0.0, 1.0),
        TextVertex::new(x_max, y_min, 1.0, 1.0),
        TextVertex::new(x_min, y_max, 0.0, 0.0),
        TextVertex::new(x_max, y_min, 1.0, 1.0),
        TextVertex::new(x_max, y_max, 1.0, 0.0),
    ]
}

/// Orthographic projection matching the viewport in pixels
pub fn screen_projection(viewport: Viewport) -> Mat4 {
    utils::screen_orthographic(viewport.width as f32, viewport.height as f32)
}
