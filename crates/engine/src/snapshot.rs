use arrayvec::ArrayVec;

use crate::core::Piece;
use crate::game::GameState;
use crate::score::HighscoreRecord;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, MAX_PREVIEW_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    pub fn piece(&self) -> Piece {
        Piece {
            kind: self.kind,
            rotation: self.rotation,
            x: self.x,
            y: self.y,
        }
    }
}

/// Read-only view of everything the renderer draws in one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub state: GameState,
    /// Visible rows, 0 = empty, otherwise [`PieceKind::id`]
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// `None` outside a run (menu, rankings, settings)
    pub active: Option<ActiveSnapshot>,
    pub next_queue: ArrayVec<PieceKind, MAX_PREVIEW_COUNT>,
    pub score: u32,
    pub highscore: u32,
    pub level: u32,
    pub lines: u32,
    pub menu_selected: usize,
    /// Game over with a qualifying score: the name prompt is shown
    pub name_entry: bool,
    pub player_name: String,
    pub rankings: Vec<HighscoreRecord>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.state = GameState::Menu;
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next_queue.clear();
        self.score = 0;
        self.highscore = 0;
        self.level = 1;
        self.lines = 0;
        self.menu_selected = 0;
        self.name_entry = false;
        self.player_name.clear();
        self.rankings.clear();
    }

    /// Whether the board is part of this frame
    pub fn shows_board(&self) -> bool {
        matches!(
            self.state,
            GameState::Playing | GameState::Paused | GameState::GameOver
        )
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            state: GameState::Menu,
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next_queue: ArrayVec::new(),
            score: 0,
            highscore: 0,
            level: 1,
            lines: 0,
            menu_selected: 0,
            name_entry: false,
            player_name: String::new(),
            rankings: Vec::new(),
        }
    }
}
