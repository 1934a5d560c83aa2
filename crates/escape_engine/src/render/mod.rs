//! Rendering
//!
//! Screen-space text rendering over an abstract GPU surface, plus a
//! software surface that composites into an in-memory frame.
//!
//! The GPU side is narrow: a backend uploads single-channel
//! coverage textures and draws textured quads. Scene meshes and shader
//! programs are owned by the backend, not by this crate.

pub mod text;
pub mod software;

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero (e.g. a minimized window)
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Aspect ratio (width / height); 1.0 for an empty viewport
    pub fn aspect(self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_aspect() {
        assert_eq!(Viewport::new(1280, 640).aspect(), 2.0);
        assert_eq!(Viewport::new(100, 0).aspect(), 1.0);
        assert_eq!(Viewport::new(0, 100).aspect(), 1.0);
        assert!(Viewport::new(0, 100).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
    }
}
