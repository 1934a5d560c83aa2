//! Text renderer: shaping, glyph cache and quad drawing in one place

use crate::foundation::math::{Vec2, Vec3};
use crate::render::Viewport;

use super::shaping::FIXED_POINT_SCALE;
use super::{
    glyph_quad, screen_projection, CachedGlyph, GlyphCache, GlyphKey, GlyphRasterizer,
    GlyphSurface, TextResult, TextShaper,
};

/// Draws single-line strings at pixel origins
///
/// Owns the shaper and rasterizer for one font face plus the glyph cache.
/// Each string is positioned independently; there is no wrapping.
pub struct TextRenderer<S, R> {
    shaper: S,
    rasterizer: R,
    cache: GlyphCache,
    color: Vec3,
}

impl<S: TextShaper, R: GlyphRasterizer> TextRenderer<S, R> {
    /// Create a renderer tinting all text with `color` (RGB, 0.0-1.0)
    pub fn new(shaper: S, rasterizer: R, color: Vec3) -> Self {
        Self {
            shaper,
            rasterizer,
            cache: GlyphCache::new(),
            color,
        }
    }

    /// Draw `text` with its first pen position at `(origin_x, origin_y)`
    ///
    /// Glyphs seen for the first time are rasterized and uploaded through
    /// `surface`; later uses reuse the cached texture.
    ///
    /// Nothing is drawn into a zero-sized viewport (e.g. a minimized window).
    ///
    /// # Returns
    /// Number of glyph quads drawn (glyphs without pixels are skipped)
    pub fn render_text<G: GlyphSurface + ?Sized>(
        &mut self,
        surface: &mut G,
        text: &str,
        origin_x: f32,
        origin_y: f32,
        viewport: Viewport,
    ) -> TextResult<usize> {
        if text.is_empty() || viewport.is_empty() {
            return Ok(0);
        }

        let shaped = self.shaper.shape(text)?;
        let projection = screen_projection(viewport);
        let font = self.rasterizer.font_id();
        let size_px = self.rasterizer.size_px();

        let mut pen = Vec2::new(origin_x, origin_y);
        let mut drawn = 0;

        for glyph in &shaped {
            let key = GlyphKey::new(font, size_px, glyph.glyph_id);
            let rasterizer = &mut self.rasterizer;
            let cached = *self.cache.get_or_insert_with(key, || {
                let bitmap = rasterizer.rasterize(glyph.glyph_id)?;
                let texture = if bitmap.is_empty() {
                    None
                } else {
                    Some(surface.upload_coverage(bitmap.width, bitmap.height, &bitmap.coverage)?)
                };
                Ok(CachedGlyph::from_bitmap(&bitmap, texture))
            })?;

            if let Some(texture) = cached.texture {
                let offset = Vec2::new(
                    glyph.x_offset as f32 / FIXED_POINT_SCALE,
                    glyph.y_offset as f32 / FIXED_POINT_SCALE,
                );
                let quad = glyph_quad(pen + offset, &cached);
                surface.draw_glyph(texture, &quad, &projection, self.color);
                log::trace!("Glyph {} at ({:.1}, {:.1})", glyph.glyph_id, pen.x, pen.y);
                drawn += 1;
            }

            pen.x += glyph.x_advance as f32 / FIXED_POINT_SCALE;
            pen.y += glyph.y_advance as f32 / FIXED_POINT_SCALE;
        }

        Ok(drawn)
    }

    /// Switch to another face or size
    ///
    /// Cached glyphs are kept; they are keyed by face and size, so the new
    /// face never picks up the old face's textures.
    pub fn set_font(&mut self, shaper: S, rasterizer: R) {
        log::info!("Text font switched; {} glyphs stay cached", self.cache.len());
        self.shaper = shaper;
        self.rasterizer = rasterizer;
    }

    /// Text tint color
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Change the text tint color
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    /// The glyph cache
    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;
    use crate::render::text::{FontId, GlyphBitmap, ShapedGlyph, TextError, TextVertex};
    use crate::render::software::SoftwareSurface;
    use crate::render::text::{FontdueRasterizer, RustybuzzShaper};
    use crate::render::TextureHandle;

    /// One glyph per char, glyph id = codepoint, 10px advance
    struct CharShaper;

    impl TextShaper for CharShaper {
        fn shape(&self, text: &str) -> TextResult<Vec<ShapedGlyph>> {
            Ok(text.chars().map(|c| ShapedGlyph::advancing(c as u32, 10 * 64)).collect())
        }
    }

    struct CountingRasterizer {
        font: FontId,
        calls: usize,
    }

    impl CountingRasterizer {
        fn new(font: u64) -> Self {
            Self { font: FontId(font), calls: 0 }
        }
    }

    impl GlyphRasterizer for CountingRasterizer {
        fn font_id(&self) -> FontId {
            self.font
        }

        fn size_px(&self) -> f32 {
            16.0
        }

        fn rasterize(&mut self, glyph_id: u32) -> TextResult<GlyphBitmap> {
            self.calls += 1;
            if glyph_id == u32::from('!') {
                return Err(TextError::Rasterize { glyph_id, reason: "no outline".to_string() });
            }
            // Spaces have no pixels
            let (width, height) = if glyph_id == u32::from(' ') { (0, 0) } else { (2, 3) };
            Ok(GlyphBitmap {
                width,
                height,
                left: 1,
                bottom: -1,
                coverage: vec![255; (width * height) as usize],
            })
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        uploads: u32,
        draws: Vec<(TextureHandle, [TextVertex; 6])>,
    }

    impl GlyphSurface for RecordingSurface {
        fn upload_coverage(&mut self, width: u32, height: u32, coverage: &[u8]) -> TextResult<TextureHandle> {
            assert_eq!(coverage.len(), (width * height) as usize);
            self.uploads += 1;
            Ok(TextureHandle(self.uploads))
        }

        fn draw_glyph(&mut self, texture: TextureHandle, vertices: &[TextVertex; 6], _projection: &Mat4, _color: Vec3) {
            self.draws.push((texture, *vertices));
        }
    }

    const VIEWPORT: Viewport = Viewport::new(640, 480);

    fn renderer(font: u64) -> TextRenderer<CharShaper, CountingRasterizer> {
        TextRenderer::new(CharShaper, CountingRasterizer::new(font), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_repeat_string_rasterizes_nothing_new() {
        let mut text = renderer(1);
        let mut surface = RecordingSurface::default();

        text.render_text(&mut surface, "Good luck", 0.0, 0.0, VIEWPORT).unwrap();
        let first_pass = text.rasterizer.calls;
        text.render_text(&mut surface, "Good luck", 0.0, 0.0, VIEWPORT).unwrap();

        assert_eq!(text.rasterizer.calls, first_pass);
        assert_eq!(surface.uploads as usize, first_pass - 1); // space is never uploaded
    }

    #[test]
    fn test_unique_glyphs_rasterized_once_each() {
        let mut text = renderer(1);
        let mut surface = RecordingSurface::default();

        // 8 glyph instances, 5 unique glyphs: a b c d and space
        let drawn = text.render_text(&mut surface, "abca bdd", 0.0, 0.0, VIEWPORT).unwrap();

        assert_eq!(text.rasterizer.calls, 5);
        assert_eq!(text.cache().len(), 5);
        assert_eq!(drawn, 7);
        assert_eq!(surface.draws.len(), 7);
        assert_eq!(text.cache().stats().hits, 3);
    }

    #[test]
    fn test_pen_advances_in_pixels() {
        let mut text = renderer(1);
        let mut surface = RecordingSurface::default();

        text.render_text(&mut surface, "ab", 100.0, 50.0, VIEWPORT).unwrap();

        // left bearing 1, bottom -1, height 3
        let first = surface.draws[0].1;
        let second = surface.draws[1].1;
        assert_eq!(first[1].position, [101.0, 49.0]);
        assert_eq!(second[1].position, [111.0, 49.0]);
        assert_eq!(second[0].position, [111.0, 52.0]);
    }

    #[test]
    fn test_same_glyph_reuses_texture() {
        let mut text = renderer(1);
        let mut surface = RecordingSurface::default();

        text.render_text(&mut surface, "aa", 0.0, 0.0, VIEWPORT).unwrap();
        assert_eq!(surface.draws[0].0, surface.draws[1].0);
        assert_eq!(surface.uploads, 1);
    }

    #[test]
    fn test_font_change_does_not_reuse_textures() {
        let mut text = renderer(1);
        let mut surface = RecordingSurface::default();

        text.render_text(&mut surface, "abc", 0.0, 0.0, VIEWPORT).unwrap();
        text.set_font(CharShaper, CountingRasterizer::new(2));
        text.render_text(&mut surface, "abc", 0.0, 0.0, VIEWPORT).unwrap();

        assert_eq!(text.rasterizer.calls, 3);
        assert_eq!(text.cache().len(), 6);
        assert_eq!(surface.uploads, 6);
    }

    #[test]
    fn test_rasterizer_failure_propagates() {
        let mut text = renderer(1);
        let mut surface = RecordingSurface::default();

        let result = text.render_text(&mut surface, "hi!", 0.0, 0.0, VIEWPORT);
        assert!(matches!(result, Err(TextError::Rasterize { .. })));
        assert_eq!(text.cache().len(), 2);
    }

    #[test]
    fn test_zero_sized_viewport_draws_nothing() {
        let mut text = renderer(1);
        let mut surface = RecordingSurface::default();

        for viewport in [Viewport::new(0, 0), Viewport::new(640, 0), Viewport::new(0, 480)] {
            assert_eq!(text.render_text(&mut surface, "Good luck!", 20.0, 50.0, viewport).unwrap(), 0);
        }
        assert_eq!(text.rasterizer.calls, 0);
        assert!(surface.draws.is_empty());
    }

    const FIXTURE_FONT: &[u8] = include_bytes!("../../../tests/fixtures/DejaVuSansMono.ttf");

    fn fixture_renderer(size_px: f32) -> TextRenderer<RustybuzzShaper, FontdueRasterizer> {
        TextRenderer::new(
            RustybuzzShaper::new(FIXTURE_FONT.to_vec(), size_px).unwrap(),
            FontdueRasterizer::new(FIXTURE_FONT, size_px).unwrap(),
            Vec3::new(1.0, 1.0, 1.0),
        )
    }

    #[test]
    fn test_shaped_ids_match_rasterizer_font() {
        let shaper = RustybuzzShaper::new(FIXTURE_FONT.to_vec(), 20.0).unwrap();
        let font = fontdue::Font::from_bytes(FIXTURE_FONT, fontdue::FontSettings::default()).unwrap();

        let text = "Good luck!";
        let shaped = shaper.shape(text).unwrap();
        assert_eq!(shaped.len(), text.chars().count());
        for (glyph, c) in shaped.iter().zip(text.chars()) {
            assert_eq!(glyph.glyph_id, u32::from(font.lookup_glyph_index(c)), "{c:?}");
        }
    }

    #[test]
    fn test_real_font_pen_advance() {
        let mut text = fixture_renderer(20.0);
        let advance = text.shaper.shape("H").unwrap()[0].x_advance;
        let mut surface = RecordingSurface::default();

        let drawn = text.render_text(&mut surface, "HH", 10.0, 20.0, VIEWPORT).unwrap();

        assert_eq!(drawn, 2);
        assert_eq!(surface.uploads, 1);
        let dx = surface.draws[1].1[1].position[0] - surface.draws[0].1[1].position[0];
        approx::assert_relative_eq!(dx, advance as f32 / 64.0, epsilon = 1e-4);
    }

    #[test]
    fn test_real_font_repeat_adds_no_textures() {
        let mut text = fixture_renderer(20.0);
        let mut surface = SoftwareSurface::new(VIEWPORT);

        let drawn = text.render_text(&mut surface, "Good luck!", 20.0, 50.0, VIEWPORT).unwrap();
        let textures = surface.texture_count();
        let again = text.render_text(&mut surface, "Good luck!", 20.0, 50.0, VIEWPORT).unwrap();

        // 10 glyphs, the space has no pixels
        assert_eq!(drawn, 9);
        assert_eq!(again, 9);
        assert_eq!(surface.texture_count(), textures);
        assert_eq!(textures, 8); // G o d l u c k !
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut text = renderer(1);
        let mut surface = RecordingSurface::default();

        assert_eq!(text.render_text(&mut surface, "", 0.0, 0.0, VIEWPORT).unwrap(), 0);
        assert_eq!(text.rasterizer.calls, 0);
    }
}
