//! Play mode
//!
//! One game session: input events set the pending choice, `update` advances
//! the story, and `draw` shows the scene through the location's camera with
//! the four text fields on top.

use escape_engine::prelude::*;

use crate::config::{GameConfig, TextConfig};
use crate::error::{GameError, GameResult};
use crate::narrative::NarrativeState;
use crate::story::{Location, Side};

/// Frame driver for the adventure
pub struct PlayMode<S, R> {
    state: NarrativeState,
    scene: Scene,
    cameras: CameraMap<Location>,
    text: Option<TextRenderer<S, R>>,
    layout: TextConfig,
}

impl<S: TextShaper, R: GlyphRasterizer> PlayMode<S, R> {
    /// Build a session from config.
    ///
    /// Without camera bindings the scene must have exactly one camera;
    /// with bindings every location must be bound to a camera in the scene.
    /// Passing no text renderer runs the story without an overlay.
    ///
    /// # Errors
    /// [`GameError::Scene`] when the camera preconditions do not hold.
    pub fn new(config: &GameConfig, text: Option<TextRenderer<S, R>>) -> GameResult<Self> {
        let scene = config.scene.clone();
        let cameras = if config.camera_bindings.is_empty() {
            CameraMap::single(&scene, &Location::ALL)?
        } else {
            CameraMap::from_bindings(&scene, &Location::ALL, &config.camera_bindings)?
        };

        if text.is_none() {
            log::info!("No text renderer, running without overlay");
        }

        Ok(Self {
            state: NarrativeState::new(),
            scene,
            cameras,
            text,
            layout: config.text.clone(),
        })
    }

    /// Handle an input event. Returns `true` if it was consumed.
    pub fn handle_event(&mut self, event: &AppEvent) -> bool {
        let Some(key) = event.pressed_key() else {
            return false;
        };

        if let Some(pending) = self.state.pending() {
            log::warn!("Ignoring {:?} while {:?} is pending", key, pending);
            return false;
        }

        match key {
            KeyCode::Left => self.state.choose(Side::Left),
            KeyCode::Right => self.state.choose(Side::Right),
            KeyCode::R => {
                self.state.reset();
                true
            }
            _ => false,
        }
    }

    /// Advance the story by `elapsed` seconds
    pub fn update(&mut self, elapsed: f32) {
        self.state.update(elapsed);
    }

    /// Draw the scene and the text overlay
    ///
    /// # Errors
    /// Propagates text rendering failures. A cache miss is not a failure.
    pub fn draw<T>(&mut self, target: &mut T, viewport: Viewport) -> GameResult<()>
    where
        T: SceneDrawer + GlyphSurface,
    {
        let location = self.state.location();
        let handle = self.active_camera().ok_or(GameError::MissingCamera(location))?;
        let camera = self.scene.camera_mut(handle).ok_or(GameError::MissingCamera(location))?;
        // A minimized window keeps the last aspect
        if !viewport.is_empty() {
            camera.set_aspect_ratio(viewport.aspect());
        }
        if let Some(camera) = self.scene.camera(handle) {
            target.draw_scene(&self.scene, camera);
        }

        let Some(text) = self.text.as_mut() else {
            return Ok(());
        };

        let origins = [
            self.layout.message_origin,
            self.layout.left_origin,
            self.layout.right_origin,
            self.layout.result_origin,
        ];
        for (field, [x, y]) in self.state.ui_text().iter().zip(origins) {
            text.render_text(&mut *target, field, x, y, viewport)?;
        }

        Ok(())
    }

    /// Camera bound to the current location
    pub fn active_camera(&self) -> Option<CameraHandle> {
        self.cameras.get(self.state.location())
    }

    /// Name of the camera bound to the current location
    pub fn active_camera_name(&self) -> Option<&str> {
        self.active_camera()
            .and_then(|handle| self.scene.camera_name(handle))
    }

    /// Story state
    pub fn state(&self) -> &NarrativeState {
        &self.state
    }

    /// Text renderer, if the session has an overlay
    pub fn text(&self) -> Option<&TextRenderer<S, R>> {
        self.text.as_ref()
    }
}
