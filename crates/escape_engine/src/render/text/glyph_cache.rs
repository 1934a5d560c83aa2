//! Glyph texture cache
//!
//! One entry per rasterized glyph, created lazily on first use and kept for
//! the lifetime of the cache. There is no eviction.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::render::TextureHandle;

use super::shaping::FIXED_POINT_SCALE;
use super::{FontId, GlyphBitmap, TextResult};

/// Cache key: font face, pixel size and glyph index
///
/// Keying by glyph index alone would hand back stale textures after a font
/// or size change, since glyph ids are only unique within one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    /// Font face
    pub font: FontId,
    /// Pixel size in 26.6 fixed point
    pub size: u32,
    /// Glyph index in the face
    pub glyph_id: u32,
}

impl GlyphKey {
    /// Build a key for a glyph at a pixel size
    pub fn new(font: FontId, size_px: f32, glyph_id: u32) -> Self {
        Self {
            font,
            size: (size_px * FIXED_POINT_SCALE).round() as u32,
            glyph_id,
        }
    }
}

/// Cached glyph: texture plus placement metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedGlyph {
    /// Uploaded coverage texture; `None` for glyphs with no pixels
    pub texture: Option<TextureHandle>,
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Offset from the pen to the bitmap's left edge
    pub left: i32,
    /// Offset from the baseline to the bitmap's bottom edge (Y up)
    pub bottom: i32,
}

impl CachedGlyph {
    /// Record an uploaded bitmap
    pub fn from_bitmap(bitmap: &GlyphBitmap, texture: Option<TextureHandle>) -> Self {
        Self {
            texture,
            width: bitmap.width,
            height: bitmap.height,
            left: bitmap.left,
            bottom: bitmap.bottom,
        }
    }
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that had to load the glyph
    pub misses: u64,
}

/// Unbounded glyph texture cache
#[derive(Debug, Default)]
pub struct GlyphCache {
    entries: HashMap<GlyphKey, CachedGlyph>,
    stats: CacheStats,
}

impl GlyphCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, loading it with `load` on a miss
    ///
    /// A miss is the expected path for a glyph's first use. Only a failure
    /// inside `load` is an error, and nothing is cached in that case.
    pub fn get_or_insert_with<F>(&mut self, key: GlyphKey, load: F) -> TextResult<&CachedGlyph>
    where
        F: FnOnce() -> TextResult<CachedGlyph>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let glyph = load()?;
                log::debug!("Cached glyph {} at {}/64 px", key.glyph_id, key.size);
                Ok(entry.insert(glyph))
            }
        }
    }

    /// Look up `key` without loading
    pub fn get(&self, key: &GlyphKey) -> Option<&CachedGlyph> {
        self.entries.get(key)
    }

    /// Number of cached glyphs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit/miss counters since creation
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
