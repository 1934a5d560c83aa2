//! Game configuration
//!
//! Loaded from TOML or RON through [`Config`]; every section has defaults so
//! a config file only needs the values it changes.

use std::path::PathBuf;

use escape_engine::prelude::*;
use serde::{Deserialize, Serialize};

use crate::story::Location;

/// Top-level game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window / frame settings
    pub window: WindowConfig,

    /// Text overlay settings
    pub text: TextConfig,

    /// Scene cameras
    pub scene: Scene,

    /// Location to camera bindings. Empty means the scene must have exactly
    /// one camera, which every location uses.
    pub camera_bindings: Vec<CameraBinding<Location>>,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

/// Text overlay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font file; without one the game runs text-only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Pixel size
    pub font_size: f32,

    /// Text color (RGB, 0.0-1.0)
    pub color: [f32; 3],

    /// Baseline origin of the scene message
    pub message_origin: [f32; 2],

    /// Baseline origin of the left choice
    pub left_origin: [f32; 2],

    /// Baseline origin of the right choice
    pub right_origin: [f32; 2],

    /// Baseline origin of the result line
    pub result_origin: [f32; 2],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        const MARGIN: f32 = 20.0;
        Self {
            font_path: None,
            font_size: 36.0,
            color: [1.0, 1.0, 1.0],
            message_origin: [MARGIN, 600.0],
            left_origin: [MARGIN, 500.0],
            right_origin: [MARGIN + 500.0, 500.0],
            result_origin: [MARGIN, 50.0],
        }
    }
}

impl TextConfig {
    /// Text color as a vector
    pub fn color(&self) -> Vec3 {
        Vec3::from(self.color)
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// The bundled layout: one named camera per area of the map, with every
    /// location bound to the camera of its area
    pub fn with_default_scene() -> Self {
        let aspect = 1280.0 / 720.0;
        let camera = |x: f32, y: f32, z: f32| {
            Camera::perspective(Vec3::new(x, y, z), 60.0, aspect, 0.1, 100.0)
                .looking_at(Vec3::zeros())
        };

        let scene = Scene::new(
            "escape",
            vec![
                NamedCamera::new("cell", camera(0.0, -6.0, 3.0)),
                NamedCamera::new("hall", camera(6.0, -6.0, 4.0)),
                NamedCamera::new("shore", camera(-8.0, 4.0, 5.0)),
                NamedCamera::new("deck", camera(-12.0, 10.0, 6.0)),
                NamedCamera::new("woods", camera(10.0, 10.0, 4.0)),
            ],
        );

        let camera_bindings = Location::ALL
            .iter()
            .map(|&location| CameraBinding::new(location, default_camera_name(location)))
            .collect();

        Self {
            scene,
            camera_bindings,
            ..Self::default()
        }
    }
}

fn default_camera_name(location: Location) -> &'static str {
    match location {
        Location::Prison => "cell",
        Location::Dungeon | Location::Table | Location::Guards => "hall",
        Location::Coast | Location::Crate | Location::CoastGuards => "shore",
        Location::Ship => "deck",
        Location::Forest | Location::Deepwoods | Location::OarLoc | Location::Raft => "woods",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("escape_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_default_layout() {
        let text = TextConfig::default();
        assert_eq!(text.message_origin[1], 600.0);
        assert_eq!(text.left_origin[1], 500.0);
        assert_eq!(text.right_origin[0] - text.left_origin[0], 500.0);
        assert_eq!(text.result_origin[1], 50.0);
    }

    #[test]
    fn test_default_scene_binds_every_location() {
        let config = GameConfig::with_default_scene();
        assert_eq!(config.camera_bindings.len(), Location::ALL.len());
        for binding in &config.camera_bindings {
            assert!(config.scene.find_camera(&binding.camera).is_some(), "{}", binding.camera);
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(
            &path,
            "[text]\nfont_size = 24.0\n\n[[camera_bindings]]\nkey = \"Ship\"\ncamera = \"deck\"\n",
        )
        .unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.text.font_size, 24.0);
        assert_eq!(config.text.message_origin, TextConfig::default().message_origin);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.camera_bindings, vec![CameraBinding::new(Location::Ship, "deck")]);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("game.ron");
        let mut config = GameConfig::with_default_scene();
        config.text.font_path = Some(PathBuf::from("fonts/serif.ttf"));

        config.save_to_file(&path).unwrap();
        let loaded = GameConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
