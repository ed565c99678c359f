//! Game flow for stackfall.
//!
//! The engine owns one run at a time and everything around it: menus, pause,
//! game over with name entry, rankings. It is driven entirely from outside:
//!
//! - [`Game::handle_event`] for every [`InputEvent`](types::InputEvent)
//! - [`Game::update`] once per frame with the current time in milliseconds
//! - [`Game::snapshot`] to hand the renderer a read-only view
//!
//! No clock, terminal or filesystem is touched here; persistence goes through
//! the [`score::HighscoreStore`] the caller chose.

pub mod config;
pub mod game;
pub mod menu;
pub mod repeat;
pub mod snapshot;

pub use stackfall_core as core;
pub use stackfall_score as score;
pub use stackfall_types as types;

pub use config::EngineConfig;
pub use game::{is_name_char, Game, GameState};
pub use menu::{MainMenuItem, MenuCursor, MenuLabel, PauseMenuItem, MAIN_MENU, PAUSE_MENU};
pub use repeat::{KeyRepeat, RepeatState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
