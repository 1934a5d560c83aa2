//! Key to camera mapping built once at load time

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Serialize, Deserialize};

use super::{CameraHandle, Scene, SceneError};

/// Config entry binding a key (e.g. a game location) to a camera name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraBinding<K> {
    /// Key being bound
    pub key: K,
    /// Name of a camera in the scene
    pub camera: String,
}

impl<K> CameraBinding<K> {
    /// Create a binding
    pub fn new(key: K, camera: impl Into<String>) -> Self {
        Self { key, camera: camera.into() }
    }
}

/// Complete mapping from keys to scene cameras
///
/// Construction checks every key up front, so lookups for those keys never
/// miss afterwards.
#[derive(Debug, Clone)]
pub struct CameraMap<K> {
    cameras: HashMap<K, CameraHandle>,
}

impl<K: Copy + Eq + Hash + Debug> CameraMap<K> {
    /// Bind every key to the scene's single camera
    ///
    /// # Errors
    /// [`SceneError::CameraCount`] unless the scene has exactly one camera.
    pub fn single(scene: &Scene, keys: &[K]) -> Result<Self, SceneError> {
        let handle = scene.single_camera()?;
        log::info!("Scene '{}': all {} keys use the single camera", scene.name, keys.len());
        Ok(Self {
            cameras: keys.iter().map(|key| (*key, handle)).collect(),
        })
    }

    /// Bind every key through explicit bindings
    ///
    /// # Errors
    /// - [`SceneError::MissingBinding`] if a key has no binding
    /// - [`SceneError::UnknownCamera`] if a binding names a missing camera
    pub fn from_bindings(
        scene: &Scene,
        keys: &[K],
        bindings: &[CameraBinding<K>],
    ) -> Result<Self, SceneError> {
        let mut cameras = HashMap::with_capacity(keys.len());

        for key in keys {
            // Later bindings for the same key win
            let binding = bindings
                .iter()
                .rev()
                .find(|binding| binding.key == *key)
                .ok_or_else(|| SceneError::MissingBinding(format!("{key:?}")))?;

            let handle = scene
                .find_camera(&binding.camera)
                .ok_or_else(|| SceneError::UnknownCamera {
                    key: format!("{key:?}"),
                    camera: binding.camera.clone(),
                })?;

            log::debug!("{:?} -> camera '{}'", key, binding.camera);
            cameras.insert(*key, handle);
        }

        log::info!("Scene '{}': bound {} keys to cameras", scene.name, cameras.len());
        Ok(Self { cameras })
    }

    /// Camera bound to `key`
    pub fn get(&self, key: K) -> Option<CameraHandle> {
        self.cameras.get(&key).copied()
    }

    /// Number of bound keys
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// Whether no keys are bound
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
