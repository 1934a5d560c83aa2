//! # Escape
//!
//! A short branching text adventure. The player escapes a prison by picking
//! the left or right option at every step; the location decides which camera
//! the scene is shown through and the dialogue overlay is drawn with the
//! engine's glyph-cached text renderer.
//!
//! - [`story`]: locations, items and the text tables
//! - [`narrative`]: the state machine and its pure transition function
//! - [`play_mode`]: per-frame driver (`handle_event` / `update` / `draw`)
//! - [`config`]: window, text layout and camera bindings

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod narrative;
pub mod play_mode;
pub mod story;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use narrative::{NarrativeState, Transition};
pub use play_mode::PlayMode;
pub use story::{Item, Location, Message, Outcome, Prompt, Side};
