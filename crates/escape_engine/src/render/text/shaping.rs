//! Text shaping
//!
//! Turns a string into an ordered run of glyph ids with advances, the way
//! HarfBuzz does. Positions are reported in 26.6 fixed point so callers can
//! treat any shaper like `hb_shape` over a FreeType face.

use super::{TextError, TextResult};

/// 26.6 fixed-point units per pixel
pub const FIXED_POINT_SCALE: f32 = 64.0;

/// One glyph of a shaped run, in shaping order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph index in the font face (not a Unicode codepoint)
    pub glyph_id: u32,
    /// Horizontal pen advance, 26.6 fixed point
    pub x_advance: i32,
    /// Vertical pen advance, 26.6 fixed point
    pub y_advance: i32,
    /// Horizontal draw offset from the pen, 26.6 fixed point
    pub x_offset: i32,
    /// Vertical draw offset from the pen, 26.6 fixed point
    pub y_offset: i32,
}

impl ShapedGlyph {
    /// Glyph with a horizontal advance only
    pub const fn advancing(glyph_id: u32, x_advance: i32) -> Self {
        Self { glyph_id, x_advance, y_advance: 0, x_offset: 0, y_offset: 0 }
    }
}

/// Text shaping service bound to one font face and size
pub trait TextShaper {
    /// Shape `text` left to right
    fn shape(&self, text: &str) -> TextResult<Vec<ShapedGlyph>>;
}

/// [`TextShaper`] backed by `rustybuzz`
pub struct RustybuzzShaper {
    font_data: Vec<u8>,
    face_index: u32,
    size_px: f32,
    units_per_em: f32,
}

impl RustybuzzShaper {
    /// Create a shaper for the first face in `font_data`
    ///
    /// # Arguments
    /// * `font_data` - Raw font file bytes (TTF or OTF)
    /// * `size_px` - Pixel size the advances are scaled to
    pub fn new(font_data: Vec<u8>, size_px: f32) -> TextResult<Self> {
        Self::with_face_index(font_data, 0, size_px)
    }

    /// Create a shaper for face `face_index` of a font collection
    pub fn with_face_index(font_data: Vec<u8>, face_index: u32, size_px: f32) -> TextResult<Self> {
        let face = rustybuzz::Face::from_slice(&font_data, face_index)
            .ok_or_else(|| TextError::FontLoad(format!("rustybuzz could not parse face {face_index}")))?;
        let units_per_em = f32::from(rustybuzz::ttf_parser::Face::units_per_em(&face));
        if units_per_em <= 0.0 {
            return Err(TextError::FontLoad("font reports zero units per em".to_string()));
        }

        log::info!("Shaper ready: {} units/em at {}px", units_per_em, size_px);
        Ok(Self {
            font_data,
            face_index,
            size_px,
            units_per_em,
        })
    }

    /// Pixel size the shaper scales to
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    fn to_fixed(&self, font_units: i32) -> i32 {
        (font_units as f32 * self.size_px * FIXED_POINT_SCALE / self.units_per_em).round() as i32
    }
}

impl TextShaper for RustybuzzShaper {
    fn shape(&self, text: &str) -> TextResult<Vec<ShapedGlyph>> {
        // The face borrows the font bytes, so it is re-parsed per call
        let face = rustybuzz::Face::from_slice(&self.font_data, self.face_index)
            .ok_or_else(|| TextError::Shaping {
                text: text.to_string(),
                reason: "font face no longer parses".to_string(),
            })?;

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();

        let output = rustybuzz::shape(&face, &[], buffer);
        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, position)| ShapedGlyph {
                glyph_id: info.glyph_id,
                x_advance: self.to_fixed(position.x_advance),
                y_advance: self.to_fixed(position.y_advance),
                x_offset: self.to_fixed(position.x_offset),
                y_offset: self.to_fixed(position.y_offset),
            })
            .collect::<Vec<_>>();

        log::trace!("Shaped {:?} into {} glyphs", text, glyphs.len());
        Ok(glyphs)
    }
}
