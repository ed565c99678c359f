//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows (indexed 0-19)
//! - **Buffer**: 2 hidden rows above the playfield (indexed -2 and -1)
//! - **Spawn position**: (3, -1), so a fresh piece straddles the buffer and row 0
//!
//! # Frame Timing
//!
//! Gravity is counted in frames, not milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FPS` | 60 | Frame-rate cap of the main loop |
//! | `INITIAL_FALL_SPEED` | 30 | Frames per row at level 1 |
//! | `MIN_FALL_SPEED` | 5 | Fastest gravity, in frames per row |
//! | `SOFT_DROP_DIVISOR` | 4 | Soft drop divides the interval by 4 |
//!
//! Key repeat is driven by input timestamps (`KEY_REPEAT_DELAY_MS`, then every
//! `KEY_REPEAT_INTERVAL_MS` while held).
//!
//! # Examples
//!
//! ```
//! use stackfall_types::{PieceKind, Rotation, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! let rotation = Rotation::North;
//! assert_eq!(rotation.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in visible cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Hidden rows stored above the visible playfield
pub const BUFFER_ROWS: u8 = 2;

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (3, -1);

/// Frame-rate cap of the main loop
pub const FPS: u32 = 60;

/// Gravity interval at level 1, in frames per row
pub const INITIAL_FALL_SPEED: u32 = 30;

/// Fastest gravity interval, in frames per row
pub const MIN_FALL_SPEED: u32 = 5;

/// Frames shaved off the gravity interval per level
pub const FALL_SPEED_DECREMENT: u32 = 1;

/// Soft drop divides the gravity interval by this value
pub const SOFT_DROP_DIVISOR: u32 = 4;

/// Delay before a held key starts repeating (ms)
pub const KEY_REPEAT_DELAY_MS: u64 = 170;

/// Interval between repeats of a held key (ms)
pub const KEY_REPEAT_INTERVAL_MS: u64 = 50;

/// Level increases by one every this many cleared lines
pub const LINES_PER_LEVEL: u32 = 10;

/// Default number of upcoming pieces shown
pub const DEFAULT_PREVIEW_COUNT: usize = 3;

/// Upper bound for the lookahead queue
pub const MAX_PREVIEW_COUNT: usize = 6;

/// Highscore table length
pub const MAX_HIGHSCORES: usize = 10;

/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 15;

/// Line clear scoring table
///
/// Base points for clearing N lines in a single lock, multiplied by the
/// current level (levels start at 1):
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in canonical order. A fresh bag starts from this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, used by the side panel
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Display color as (r, g, b)
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (80, 220, 220),
            PieceKind::O => (240, 220, 80),
            PieceKind::T => (200, 120, 220),
            PieceKind::S => (100, 220, 120),
            PieceKind::Z => (220, 80, 80),
            PieceKind::J => (80, 120, 220),
            PieceKind::L => (255, 165, 0),
        }
    }

    /// Compact numeric id for snapshots (0 is reserved for an empty cell)
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Rotation states, cycling clockwise
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: Rotated 90° clockwise (index 1)
/// - **South**: Rotated 180° (index 2)
/// - **West**: Rotated 270° clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index in `0..4`
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any index, wrapping modulo 4
    ///
    /// ```
    /// use stackfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(5), Rotation::East);
    /// ```
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Keys the engine understands
///
/// Printable characters (including space) arrive as `Char`; the engine decides
/// per state whether a character is a command (`p`, space) or name input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
    Char(char),
}

/// Discrete input event with a monotonic timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: Key, at_ms: u64 },
    KeyUp { key: Key, at_ms: u64 },
    Quit,
}

impl InputEvent {
    pub fn key_down(key: Key, at_ms: u64) -> Self {
        InputEvent::KeyDown { key, at_ms }
    }

    pub fn key_up(key: Key, at_ms: u64) -> Self {
        InputEvent::KeyUp { key, at_ms }
    }
}
