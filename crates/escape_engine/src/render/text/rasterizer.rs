//! Glyph rasterization
//!
//! Produces single-channel coverage bitmaps for glyph ids, with the metrics
//! needed to place them relative to the pen and baseline.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use fontdue::{Font, FontSettings};

use super::{TextError, TextResult};

/// Identity of a font face
///
/// Derived from the font bytes, so two different faces never collide in the
/// glyph cache even when their glyph ids do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u64);

impl FontId {
    /// Identify a font by its file contents
    pub fn from_bytes(font_data: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        font_data.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Coverage bitmap for one glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Offset from the pen to the bitmap's left edge
    pub left: i32,
    /// Offset from the baseline to the bitmap's bottom edge (Y up)
    pub bottom: i32,
    /// Row-major coverage, top row first, `width * height` bytes
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Whether the glyph has no visible pixels (e.g. a space)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Font rasterization service bound to one font face and size
pub trait GlyphRasterizer {
    /// Face this rasterizer draws from
    fn font_id(&self) -> FontId;

    /// Pixel size glyphs are rasterized at
    fn size_px(&self) -> f32;

    /// Rasterize one glyph by index
    fn rasterize(&mut self, glyph_id: u32) -> TextResult<GlyphBitmap>;
}

/// [`GlyphRasterizer`] backed by `fontdue`
pub struct FontdueRasterizer {
    font: Font,
    font_id: FontId,
    size_px: f32,
}

impl FontdueRasterizer {
    /// Load a rasterizer from TrueType/OpenType font data
    ///
    /// # Arguments
    /// * `font_data` - Raw font file bytes (TTF or OTF format)
    /// * `size_px` - Size in pixels to rasterize glyphs at
    pub fn new(font_data: &[u8], size_px: f32) -> TextResult<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| TextError::FontLoad(format!("fontdue error: {e}")))?;

        log::info!("Loaded font with {} glyphs at {}px", font.glyph_count(), size_px);
        Ok(Self {
            font,
            font_id: FontId::from_bytes(font_data),
            size_px,
        })
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn font_id(&self) -> FontId {
        self.font_id
    }

    fn size_px(&self) -> f32 {
        self.size_px
    }

    fn rasterize(&mut self, glyph_id: u32) -> TextResult<GlyphBitmap> {
        let index = u16::try_from(glyph_id).map_err(|_| TextError::Rasterize {
            glyph_id,
            reason: "glyph index out of range for this face".to_string(),
        })?;
        if index >= self.font.glyph_count() {
            return Err(TextError::Rasterize {
                glyph_id,
                reason: format!("face only has {} glyphs", self.font.glyph_count()),
            });
        }

        let (metrics, coverage) = self.font.rasterize_indexed(index, self.size_px);
        log::debug!("Rasterized glyph {} ({}x{})", glyph_id, metrics.width, metrics.height);

        Ok(GlyphBitmap {
            width: metrics.width as u32,
            height: metrics.height as u32,
            left: metrics.xmin,
            bottom: metrics.ymin,
            coverage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_id_depends_on_contents() {
        let a = FontId::from_bytes(b"face one");
        let b = FontId::from_bytes(b"face two");
        assert_eq!(a, FontId::from_bytes(b"face one"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_font_data_is_rejected() {
        let result = FontdueRasterizer::new(b"not a font", 24.0);
        assert!(matches!(result, Err(TextError::FontLoad(_))));
    }

    const FIXTURE_FONT: &[u8] = include_bytes!("../../../tests/fixtures/DejaVuSansMono.ttf");

    #[test]
    fn test_rasterize_real_glyphs() {
        let font = Font::from_bytes(FIXTURE_FONT, FontSettings::default()).unwrap();
        let mut rasterizer = FontdueRasterizer::new(FIXTURE_FONT, 20.0).unwrap();
        assert_eq!(rasterizer.font_id(), FontId::from_bytes(FIXTURE_FONT));

        let h = rasterizer.rasterize(u32::from(font.lookup_glyph_index('H'))).unwrap();
        assert!(!h.is_empty());
        assert_eq!(h.coverage.len(), (h.width * h.height) as usize);
        assert!(h.coverage.iter().any(|&c| c > 0));

        let space = rasterizer.rasterize(u32::from(font.lookup_glyph_index(' '))).unwrap();
        assert!(space.is_empty());
    }

    #[test]
    fn test_out_of_range_glyph_is_an_error() {
        let mut rasterizer = FontdueRasterizer::new(FIXTURE_FONT, 20.0).unwrap();
        assert!(matches!(rasterizer.rasterize(70_000), Err(TextError::Rasterize { .. })));
        assert!(matches!(rasterizer.rasterize(u32::from(u16::MAX)), Err(TextError::Rasterize { .. })));
    }

    #[test]
    fn test_empty_bitmap() {
        let space = GlyphBitmap { width: 0, height: 0, left: 0, bottom: 0, coverage: Vec::new() };
        assert!(space.is_empty());

        let dot = GlyphBitmap { width: 1, height: 1, left: 0, bottom: 0, coverage: vec![255] };
        assert!(!dot.is_empty());
    }
}
