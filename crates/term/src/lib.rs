//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders an engine snapshot into a simple framebuffer that is then
//! flushed to the terminal as a diff against the previous frame.

pub mod fb;
pub mod frame_rate;
pub mod game_view;
pub mod renderer;

pub use stackfall_engine as engine;
pub use stackfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frame_rate::FrameRateCounter;
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
