//! Game errors

use escape_engine::prelude::{ConfigError, SceneError, TextError};

use crate::story::Location;

/// Result alias for game operations
pub type GameResult<T> = Result<T, GameError>;

/// Everything that can stop the game from starting or drawing a frame
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Scene or camera setup is invalid
    #[error("Scene setup failed: {0}")]
    Scene(#[from] SceneError),

    /// Shaping, rasterizing or uploading text failed
    #[error("Text rendering failed: {0}")]
    Text(#[from] TextError),

    /// Config file could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Font or frame file IO failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered frame could not be written
    #[error("Frame output failed: {0}")]
    Frame(#[from] image::ImageError),

    /// The camera bound to a location is gone from the scene
    #[error("No camera for location {0}")]
    MissingCamera(Location),
}
