//! GPU surface seam for text drawing

use crate::foundation::math::{Mat4, Vec3};
use crate::render::TextureHandle;

use super::{TextResult, TextVertex};

/// Texture upload and quad drawing facility
///
/// Implementations draw with straight-alpha src-over blending and no depth
/// test: `out = color * a + dst * (1 - a)` where `a` is the sampled coverage.
pub trait GlyphSurface {
    /// Upload a single-channel coverage bitmap (row-major, top row first)
    fn upload_coverage(&mut self, width: u32, height: u32, coverage: &[u8]) -> TextResult<TextureHandle>;

    /// Draw one glyph quad (two triangles) tinted by `color`
    fn draw_glyph(&mut self, texture: TextureHandle, vertices: &[TextVertex; 6], projection: &Mat4, color: Vec3);
}
