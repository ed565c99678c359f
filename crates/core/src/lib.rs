//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules: pieces, the board, the piece
//! generator and the scoring policy. It has **zero dependencies** on UI,
//! persistence, or I/O, so every rule can be unit tested headless.
//!
//! # Module Structure
//!
//! - [`pieces`]: piece shape tables and the [`Piece`] value
//! - [`rng`]: 7-bag [`PieceGenerator`] with a lookahead queue
//! - [`board`]: 10x20 board (plus hidden buffer) with collision and line clearing
//! - [`scoring`]: line-clear points, level and gravity policy
//!
//! # Example
//!
//! ```
//! use stackfall_core::{Board, PieceGenerator};
//!
//! let mut board = Board::new();
//! let mut generator = PieceGenerator::new(12345);
//!
//! let mut piece = generator.get_next_piece();
//! assert!(board.is_valid_position(&piece));
//!
//! board.hard_drop(&mut piece);
//! assert_eq!(board.add_piece(&piece), Some(0));
//! assert_eq!(board.occupied_count(), 4);
//! ```

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use pieces::{get_shape, Piece, PieceShape};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score};
