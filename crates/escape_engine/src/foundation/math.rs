//! Math utilities and types
//!
//! Provides the math aliases shared by the camera and text systems. All
//! matrices follow OpenGL conventions (right-handed view space, clip-space
//! depth in -1..1).

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Mathematical constants
pub mod constants {
    use std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Pixel-space orthographic projection for a `width` x `height` viewport
    ///
    /// Maps `(0, 0)` to the bottom-left corner and `(width, height)` to the
    /// top-right corner of clip space, matching `glViewport` pixel units.
    pub fn screen_orthographic(width: f32, height: f32) -> Mat4 {
        Mat4::new_orthographic(0.0, width, 0.0, height, -1.0, 1.0)
    }
}
