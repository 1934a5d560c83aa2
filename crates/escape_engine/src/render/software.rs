//! Software surface
//!
//! A CPU implementation of [`GlyphSurface`] and [`SceneDrawer`] that
//! composites into an RGBA frame. It stands in for the GPU backend in tests
//! and in the console runner, which can save the frame as a PNG.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::scene::{Camera, Scene, SceneDrawer};

use super::text::{GlyphSurface, TextError, TextResult, TextVertex};
use super::{TextureHandle, Viewport};

struct CoverageTexture {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl CoverageTexture {
    /// Nearest-neighbour coverage lookup, clamped to the edges
    fn sample(&self, u: f32, v: f32) -> u8 {
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.coverage[(y * self.width + x) as usize]
    }
}

/// In-memory frame with glyph compositing
pub struct SoftwareSurface {
    frame: RgbaImage,
    clear_color: Rgba<u8>,
    textures: Vec<CoverageTexture>,
    glyph_draws: usize,
}

impl SoftwareSurface {
    /// Create a surface cleared to mid grey
    pub fn new(viewport: Viewport) -> Self {
        let clear_color = to_rgba8(Vec3::new(0.5, 0.5, 0.5));
        Self {
            frame: RgbaImage::from_pixel(viewport.width, viewport.height, clear_color),
            clear_color,
            textures: Vec::new(),
            glyph_draws: 0,
        }
    }

    /// Use a different clear color (RGB, 0.0-1.0)
    #[must_use]
    pub fn with_clear_color(mut self, color: Vec3) -> Self {
        self.clear_color = to_rgba8(color);
        self.clear();
        self
    }

    /// Fill the frame with the clear color
    pub fn clear(&mut self) {
        for pixel in self.frame.pixels_mut() {
            *pixel = self.clear_color;
        }
    }

    /// Current frame size
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.frame.width(), self.frame.height())
    }

    /// The composited frame (row 0 is the top of the screen)
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    /// Number of uploaded glyph textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of glyph quads drawn since creation
    pub fn glyph_draws(&self) -> usize {
        self.glyph_draws
    }

    /// Save the frame as an image file (format from the extension)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        let path = path.as_ref();
        self.frame.save(path)?;
        log::info!("Saved frame to {}", path.display());
        Ok(())
    }

    /// Project a vertex into frame pixel coordinates (Y down)
    fn to_pixels(&self, projection: &Mat4, vertex: &TextVertex) -> (f32, f32) {
        let clip = projection * Vec4::new(vertex.position[0], vertex.position[1], 0.0, 1.0);
        let x = (clip.x / clip.w + 1.0) * 0.5 * self.frame.width() as f32;
        let y = (1.0 - clip.y / clip.w) * 0.5 * self.frame.height() as f32;
        (x, y)
    }
}

impl GlyphSurface for SoftwareSurface {
    fn upload_coverage(&mut self, width: u32, height: u32, coverage: &[u8]) -> TextResult<TextureHandle> {
        if width == 0 || height == 0 || coverage.len() != (width * height) as usize {
            return Err(TextError::Upload(format!(
                "{}x{} texture with {} coverage bytes",
                width,
                height,
                coverage.len()
            )));
        }

        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(CoverageTexture { width, height, coverage: coverage.to_vec() });
        Ok(handle)
    }

    fn draw_glyph(&mut self, texture: TextureHandle, vertices: &[TextVertex; 6], projection: &Mat4, color: Vec3) {
        if self.frame.width() == 0 || self.frame.height() == 0 {
            return;
        }
        let Some(tex) = self.textures.get(texture.0 as usize) else {
            log::warn!("Draw with unknown texture {:?}", texture);
            return;
        };

        // Glyph quads are axis aligned: find the screen rect and the UVs at
        // its top-left and bottom-right corners.
        let corners: Vec<(f32, f32, [f32; 2])> = vertices
            .iter()
            .map(|vertex| {
                let (x, y) = self.to_pixels(projection, vertex);
                (x, y, vertex.uv)
            })
            .collect();
        let x0 = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min);
        let x1 = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max);
        let y0 = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min);
        let y1 = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max);
        if x1 - x0 <= 0.0 || y1 - y0 <= 0.0 {
            return;
        }

        let uv_at = |x: f32, y: f32| {
            corners
                .iter()
                .min_by(|a, b| {
                    let da = (a.0 - x).abs() + (a.1 - y).abs();
                    let db = (b.0 - x).abs() + (b.1 - y).abs();
                    da.total_cmp(&db)
                })
                .map_or([0.0, 0.0], |c| c.2)
        };
        let uv0 = uv_at(x0, y0);
        let uv1 = uv_at(x1, y1);

        let (width, height) = self.frame.dimensions();
        let row_start = y0.floor().max(0.0) as u32;
        let row_end = (y1.ceil().max(0.0) as u32).min(height);
        let col_start = x0.floor().max(0.0) as u32;
        let col_end = (x1.ceil().max(0.0) as u32).min(width);
        let rgb = [color.x, color.y, color.z];

        for py in row_start..row_end {
            let cy = py as f32 + 0.5;
            if cy < y0 || cy >= y1 {
                continue;
            }
            let t = (cy - y0) / (y1 - y0);
            let v = uv0[1] + t * (uv1[1] - uv0[1]);

            for px in col_start..col_end {
                let cx = px as f32 + 0.5;
                if cx < x0 || cx >= x1 {
                    continue;
                }
                let s = (cx - x0) / (x1 - x0);
                let u = uv0[0] + s * (uv1[0] - uv0[0]);

                let alpha = f32::from(tex.sample(u, v)) / 255.0;
                if alpha > 0.0 {
                    let dst = self.frame.get_pixel_mut(px, py);
                    *dst = blend_over(*dst, rgb, alpha);
                }
            }
        }

        self.glyph_draws += 1;
    }
}

impl SceneDrawer for SoftwareSurface {
    fn draw_scene(&mut self, scene: &Scene, camera: &Camera) {
        // No meshes in software: the scene pass is a clear
        self.clear();
        log::trace!("Scene '{}' viewed from {:?}", scene.name, camera.position);
    }
}

fn to_rgba8(color: Vec3) -> Rgba<u8> {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([channel(color.x), channel(color.y), channel(color.z), 255])
}

/// Straight-alpha src-over
fn blend_over(dst: Rgba<u8>, src: [f32; 3], alpha: f32) -> Rgba<u8> {
    let mut out = [0u8; 4];
    for i in 0..3 {
        let d = f32::from(dst.0[i]) / 255.0;
        out[i] = ((src[i] * alpha + d * (1.0 - alpha)).clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    let dst_alpha = f32::from(dst.0[3]) / 255.0;
    out[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::{glyph_quad, screen_projection, CachedGlyph};
    use crate::foundation::math::Vec2;

    const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    fn quad_at(x: f32, y: f32, width: u32, height: u32) -> [TextVertex; 6] {
        let glyph = CachedGlyph { texture: None, width, height, left: 0, bottom: 0 };
        glyph_quad(Vec2::new(x, y), &glyph)
    }

    #[test]
    fn test_upload_rejects_mismatched_coverage() {
        let mut surface = SoftwareSurface::new(Viewport::new(4, 4));
        assert!(surface.upload_coverage(2, 2, &[255; 3]).is_err());
        assert!(surface.upload_coverage(0, 0, &[]).is_err());
        assert_eq!(surface.upload_coverage(2, 2, &[255; 4]).unwrap(), TextureHandle(0));
        assert_eq!(surface.texture_count(), 1);
    }

    #[test]
    fn test_full_coverage_quad_lands_bottom_left() {
        let viewport = Viewport::new(4, 4);
        let mut surface = SoftwareSurface::new(viewport);
        let texture = surface.upload_coverage(2, 2, &[255; 4]).unwrap();

        surface.draw_glyph(texture, &quad_at(0.0, 0.0, 2, 2), &screen_projection(viewport), Vec3::new(1.0, 1.0, 1.0));

        // Y up in layout space, so the quad covers the bottom two rows
        assert_eq!(*surface.frame().get_pixel(0, 3), Rgba([255, 255, 255, 255]));
        assert_eq!(*surface.frame().get_pixel(1, 2), Rgba([255, 255, 255, 255]));
        assert_eq!(*surface.frame().get_pixel(0, 1), GREY);
        assert_eq!(*surface.frame().get_pixel(3, 3), GREY);
        assert_eq!(surface.glyph_draws(), 1);
    }

    #[test]
    fn test_zero_coverage_leaves_background() {
        let viewport = Viewport::new(4, 4);
        let mut surface = SoftwareSurface::new(viewport);
        let texture = surface.upload_coverage(1, 1, &[0]).unwrap();

        surface.draw_glyph(texture, &quad_at(0.0, 0.0, 4, 4), &screen_projection(viewport), Vec3::new(1.0, 0.0, 0.0));

        assert!(surface.frame().pixels().all(|pixel| *pixel == GREY));
    }

    #[test]
    fn test_top_row_of_bitmap_is_drawn_on_top() {
        let viewport = Viewport::new(2, 2);
        let mut surface = SoftwareSurface::new(viewport).with_clear_color(Vec3::zeros());
        // Row 0 opaque, row 1 transparent
        let texture = surface.upload_coverage(1, 2, &[255, 0]).unwrap();

        surface.draw_glyph(texture, &quad_at(0.0, 0.0, 1, 2), &screen_projection(viewport), Vec3::new(1.0, 1.0, 1.0));

        assert_eq!(*surface.frame().get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*surface.frame().get_pixel(0, 1), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_zero_sized_frame_ignores_draws() {
        let mut surface = SoftwareSurface::new(Viewport::new(0, 0));
        let texture = surface.upload_coverage(1, 1, &[255]).unwrap();

        surface.draw_glyph(texture, &quad_at(0.0, 0.0, 2, 2), &Mat4::identity(), Vec3::new(1.0, 1.0, 1.0));

        assert_eq!(surface.glyph_draws(), 0);
        assert_eq!(surface.viewport(), Viewport::new(0, 0));
    }

    #[test]
    fn test_half_coverage_blends() {
        let out = blend_over(Rgba([0, 0, 0, 255]), [1.0, 1.0, 1.0], 0.5);
        assert_eq!(out, Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_scene_pass_clears() {
        let viewport = Viewport::new(2, 2);
        let mut surface = SoftwareSurface::new(viewport);
        let texture = surface.upload_coverage(1, 1, &[255]).unwrap();
        surface.draw_glyph(texture, &quad_at(0.0, 0.0, 2, 2), &screen_projection(viewport), Vec3::new(1.0, 1.0, 1.0));

        surface.draw_scene(&Scene::default(), &Camera::default());
        assert!(surface.frame().pixels().all(|pixel| *pixel == GREY));
    }
}
