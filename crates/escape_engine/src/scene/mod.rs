//! Scene cameras
//!
//! The 3D scene itself (meshes, materials, shaders) belongs to an external
//! drawer. This module owns what the game needs to pick a view:
//!
//! ```text
//! Scene (named cameras, from config)
//!      ↓
//! CameraMap<K> (every key bound once, at load time)
//!      ↓
//! SceneDrawer::draw_scene(scene, camera)
//! ```

mod camera;
mod camera_map;
mod description;

pub use camera::Camera;
pub use camera_map::{CameraBinding, CameraMap};
pub use description::{CameraHandle, NamedCamera, Scene};

/// Scene setup errors
///
/// All of these are load-time preconditions; a game mode that hits one
/// cannot be constructed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The scene has the wrong number of cameras
    #[error("Expecting scene '{scene}' to have exactly {expected} camera(s), but it has {found}")]
    CameraCount {
        /// Scene name
        scene: String,
        /// Cameras required
        expected: usize,
        /// Cameras present
        found: usize,
    },

    /// A key has no camera binding
    #[error("No camera bound for {0}")]
    MissingBinding(String),

    /// A binding names a camera the scene does not contain
    #[error("Camera '{camera}' bound for {key} does not exist in the scene")]
    UnknownCamera {
        /// Key the binding was for
        key: String,
        /// Camera name that was not found
        camera: String,
    },
}

/// External scene drawer
///
/// Draws the 3D scene as seen through `camera`. Implemented by the rendering
/// backend; called once per frame before any text overlay.
pub trait SceneDrawer {
    /// Draw the scene through the given camera
    fn draw_scene(&mut self, scene: &Scene, camera: &Camera);
}
