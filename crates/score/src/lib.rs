//! Score keeping and the persisted highscore table.
//!
//! - [`manager`]: [`ScoreManager`], the running score and ranking
//! - [`record`]: [`HighscoreRecord`] and ranking rules
//! - [`store`]: the [`HighscoreStore`] seam with JSON-file and in-memory stores

pub mod manager;
pub mod record;
pub mod store;

pub use stackfall_core as core;
pub use stackfall_types as types;

pub use manager::{ScoreManager, ANONYMOUS_NAME};
pub use record::HighscoreRecord;
pub use store::{HighscoreStore, JsonFileStore, MemoryStore};
