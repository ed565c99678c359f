//! Terminal input module (engine-facing).
//!
//! Turns `crossterm` key events into [`InputEvent`](types::InputEvent)s for
//! the engine. [`KeyTracker`] keeps the held-key set consistent on terminals
//! that never report key releases.

pub mod map;
pub mod tracker;

pub use stackfall_types as types;

pub use map::{is_quit, map_key_code};
pub use tracker::{KeyTracker, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
