//! # Escape Engine
//!
//! The reusable half of the Escape adventure: everything that is not story.
//!
//! ## Features
//!
//! - **Text Rendering**: HarfBuzz-style shaping, on-demand glyph rasterization
//!   and a glyph texture cache drawn as screen-space quads
//! - **Scene Cameras**: serializable scene descriptions and a checked mapping
//!   from game locations to cameras
//! - **Configuration**: TOML and RON config files through one trait
//! - **Input**: backend-neutral key codes and application events
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use escape_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let font = std::fs::read("resources/fonts/PTSerif-Italic.ttf")?;
//!     let shaper = RustybuzzShaper::new(font.clone(), 36.0)?;
//!     let rasterizer = FontdueRasterizer::new(&font, 36.0)?;
//!     let mut text = TextRenderer::new(shaper, rasterizer, Vec3::new(1.0, 1.0, 1.0));
//!
//!     let viewport = Viewport::new(1280, 720);
//!     let mut surface = SoftwareSurface::new(viewport);
//!     text.render_text(&mut surface, "Good luck!", 25.0, 50.0, viewport)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod scene;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Vec2, Vec3, Vec4, Mat4},
            time::FrameClock,
        },
        input::{AppEvent, KeyCode},
        render::{
            TextureHandle, Viewport,
            software::SoftwareSurface,
            text::{
                FontId, FontdueRasterizer, GlyphCache, GlyphRasterizer, GlyphSurface,
                RustybuzzShaper, ShapedGlyph, TextError, TextRenderer, TextShaper,
            },
        },
        scene::{
            Camera, CameraBinding, CameraHandle, CameraMap, NamedCamera, Scene, SceneDrawer,
            SceneError,
        },
    };
}
