//! Text rendering system
//!
//! Screen-space text drawn one textured quad per glyph.
//!
//! # Architecture
//!
//! ```text
//! &str ──TextShaper──▶ [ShapedGlyph] ──GlyphCache──▶ CachedGlyph ──GlyphSurface──▶ quads
//!                                         │ miss
//!                                         ▼
//!                              GlyphRasterizer + upload
//! ```
//!
//! - [`TextShaper`]: string to positioned glyph ids ([`RustybuzzShaper`])
//! - [`GlyphRasterizer`]: glyph id to coverage bitmap ([`FontdueRasterizer`])
//! - [`GlyphCache`]: glyph textures keyed by font, size and glyph id
//! - [`GlyphSurface`]: texture upload and quad drawing (GPU backend)
//! - [`TextRenderer`]: ties the four together
//!
//! # Example
//!
//! ```no_run
//! use escape_engine::render::{Viewport, software::SoftwareSurface};
//! use escape_engine::render::text::{FontdueRasterizer, RustybuzzShaper, TextRenderer};
//! use escape_engine::foundation::math::Vec3;
//!
//! let font = std::fs::read("resources/fonts/default.ttf")?;
//! let mut text = TextRenderer::new(
//!     RustybuzzShaper::new(font.clone(), 48.0)?,
//!     FontdueRasterizer::new(&font, 48.0)?,
//!     Vec3::new(1.0, 1.0, 1.0),
//! );
//!
//! let viewport = Viewport::new(800, 600);
//! let mut surface = SoftwareSurface::new(viewport);
//! text.render_text(&mut surface, "Hello World", 10.0, 10.0, viewport)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod glyph_cache;
mod layout;
mod rasterizer;
mod renderer;
mod shaping;
mod surface;

pub use glyph_cache::{CachedGlyph, CacheStats, GlyphCache, GlyphKey};
pub use layout::{glyph_quad, screen_projection, TextVertex};
pub use rasterizer::{FontId, FontdueRasterizer, GlyphBitmap, GlyphRasterizer};
pub use renderer::TextRenderer;
pub use shaping::{RustybuzzShaper, ShapedGlyph, TextShaper, FIXED_POINT_SCALE};
pub use surface::GlyphSurface;

/// Result type for text operations
pub type TextResult<T> = Result<T, TextError>;

/// Errors that can occur while shaping, rasterizing or uploading text
///
/// A glyph cache miss is not one of them: misses are the normal path for
/// the first use of every glyph.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Failed to load a font face from file or data
    #[error("Failed to load font: {0}")]
    FontLoad(String),

    /// Text shaping failed
    #[error("Failed to shape text '{text}': {reason}")]
    Shaping {
        /// Text being shaped
        text: String,
        /// Failure detail
        reason: String,
    },

    /// Failed to rasterize a specific glyph
    #[error("Failed to rasterize glyph {glyph_id}: {reason}")]
    Rasterize {
        /// Glyph index in the font face
        glyph_id: u32,
        /// Failure detail
        reason: String,
    },

    /// Failed to create or upload a glyph texture
    #[error("Failed to upload glyph texture: {0}")]
    Upload(String),
}
