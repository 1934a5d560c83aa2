//! Serializable scene descriptions

use serde::{Serialize, Deserialize};

use super::{Camera, SceneError};

/// Stable index of a camera inside a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraHandle(usize);

impl CameraHandle {
    /// Position of the camera in the scene's camera list
    pub fn index(self) -> usize {
        self.0
    }
}

/// A camera with the name it is bound by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCamera {
    /// Name used by camera bindings
    pub name: String,
    /// Camera parameters
    pub camera: Camera,
}

impl NamedCamera {
    /// Create a named camera
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self { name: name.into(), camera }
    }
}

/// Scene description: the cameras a loaded scene provides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for diagnostics)
    pub name: String,
    /// Cameras in load order
    pub cameras: Vec<NamedCamera>,
}

impl Scene {
    /// Create a scene from a list of named cameras
    pub fn new(name: impl Into<String>, cameras: Vec<NamedCamera>) -> Self {
        Self { name: name.into(), cameras }
    }

    /// Number of cameras in the scene
    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    /// Look up a camera by name
    pub fn find_camera(&self, name: &str) -> Option<CameraHandle> {
        self.cameras
            .iter()
            .position(|named| named.name == name)
            .map(CameraHandle)
    }

    /// The scene's only camera
    ///
    /// # Errors
    /// [`SceneError::CameraCount`] unless the scene has exactly one camera.
    pub fn single_camera(&self) -> Result<CameraHandle, SceneError> {
        if self.cameras.len() == 1 {
            Ok(CameraHandle(0))
        } else {
            Err(SceneError::CameraCount {
                scene: self.name.clone(),
                expected: 1,
                found: self.cameras.len(),
            })
        }
    }

    /// Get a camera by handle
    pub fn camera(&self, handle: CameraHandle) -> Option<&Camera> {
        self.cameras.get(handle.0).map(|named| &named.camera)
    }

    /// Get a camera mutably by handle
    pub fn camera_mut(&mut self, handle: CameraHandle) -> Option<&mut Camera> {
        self.cameras.get_mut(handle.0).map(|named| &mut named.camera)
    }

    /// Name of the camera behind `handle`
    pub fn camera_name(&self, handle: CameraHandle) -> Option<&str> {
        self.cameras.get(handle.0).map(|named| named.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_camera_scene() -> Scene {
        Scene::new("test", vec![
            NamedCamera::new("cell", Camera::default()),
            NamedCamera::new("shore", Camera::default()),
        ])
    }

    #[test]
    fn test_find_camera_by_name() {
        let scene = two_camera_scene();
        let shore = scene.find_camera("shore").unwrap();
        assert_eq!(shore.index(), 1);
        assert_eq!(scene.camera_name(shore), Some("shore"));
        assert!(scene.find_camera("deck").is_none());
    }

    #[test]
    fn test_single_camera_requires_exactly_one() {
        let scene = two_camera_scene();
        assert_eq!(
            scene.single_camera(),
            Err(SceneError::CameraCount { scene: "test".to_string(), expected: 1, found: 2 })
        );

        let empty = Scene::new("empty", Vec::new());
        assert!(matches!(empty.single_camera(), Err(SceneError::CameraCount { found: 0, .. })));

        let single = Scene::new("one", vec![NamedCamera::new("main", Camera::default())]);
        assert_eq!(single.single_camera().unwrap().index(), 0);
    }

    #[test]
    fn test_camera_mut_updates_in_place() {
        let mut scene = two_camera_scene();
        let cell = scene.find_camera("cell").unwrap();
        scene.camera_mut(cell).unwrap().aspect = 2.5;
        assert_eq!(scene.camera(cell).unwrap().aspect, 2.5);
    }
}
