//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind,
//! plus two hidden buffer rows stored above the visible playfield.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges -2..19
//! (top to bottom, negative rows are the hidden buffer).
//!
//! The board also keeps the level/lines bookkeeping, since both only change
//! when a lock clears rows.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::scoring::calculate_level;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS, LINES_PER_LEVEL};

/// Rows actually stored: buffer + visible
pub const STORED_ROWS: usize = (BOARD_HEIGHT + BUFFER_ROWS) as usize;

/// Total number of stored cells
const BOARD_SIZE: usize = BOARD_WIDTH as usize * STORED_ROWS;

/// The game board - 10 columns x (2 + 20) rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order ((y + BUFFER) * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    level: u32,
    lines_cleared: u32,
    lines_per_level: u32,
}

impl Board {
    /// Create a new empty board at level 1
    pub fn new() -> Self {
        Self::with_lines_per_level(LINES_PER_LEVEL)
    }

    /// Create a new empty board that levels up every `lines_per_level` lines
    pub fn with_lines_per_level(lines_per_level: u32) -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            level: 1,
            lines_cleared: 0,
            lines_per_level: lines_per_level.max(1),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        let row = y as i16 + BUFFER_ROWS as i16;
        if x < 0 || x >= BOARD_WIDTH as i8 || row < 0 || row >= STORED_ROWS as i16 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get visible height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Get cell at position (x, y)
    /// Returns None if outside the stored rows
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if outside the stored rows
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within storage and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a single cell may hold part of the active piece.
    ///
    /// Columns must be inside the grid and rows above the floor. Rows above the
    /// stored buffer are open sky and never collide.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        !self.is_occupied(x, y)
    }

    /// Check whether every cell of the piece is free
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// Lock a piece into the grid and clear any rows it completes.
    ///
    /// Returns `None` without touching the grid when the position is invalid
    /// or a cell lies above the stored buffer; otherwise the number of rows
    /// cleared by this single lock.
    pub fn add_piece(&mut self, piece: &Piece) -> Option<u32> {
        let cells = piece.cells();

        // First check if all positions are valid and storable
        for &(x, y) in &cells {
            if !self.is_free(x, y) || Self::index(x, y).is_none() {
                return None;
            }
        }

        // Then lock all cells
        for &(x, y) in &cells {
            self.set(x, y, Some(piece.kind));
        }

        let cleared = self.clear_full_rows().len() as u32;
        if cleared > 0 {
            self.lines_cleared += cleared;
            self.level = calculate_level(self.lines_cleared, self.lines_per_level);
        }
        Some(cleared)
    }

    /// Move the piece down while it stays valid; returns rows descended
    pub fn hard_drop(&self, piece: &mut Piece) -> u32 {
        let mut distance = 0;
        loop {
            let mut next = *piece;
            next.move_down();
            if !self.is_valid_position(&next) {
                break;
            }
            *piece = next;
            distance += 1;
        }
        distance
    }

    /// Check if a stored row is completely filled (`row` is a storage index)
    fn is_row_full(&self, row: usize) -> bool {
        if row >= STORED_ROWS {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return the board y of each cleared row (sorted bottom to top)
    /// Uses a two-pointer algorithm with zero-allocation
    pub fn clear_full_rows(&mut self) -> ArrayVec<i8, STORED_ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_row = STORED_ROWS;

        // Scan from bottom to top
        for read_row in (0..STORED_ROWS).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row as i8 - BUFFER_ROWS as i8);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src_start = read_row * width;
                    let dst_start = write_row * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_row * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Visible rows as a grid of ids (0 = empty, see [`PieceKind::id`])
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self
                    .get(x as i8, y as i8)
                    .flatten()
                    .map_or(0, |kind| kind.id());
            }
        }
    }

    /// Number of occupied cells, buffer rows included
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Whether any locked cell sits in the hidden buffer rows
    pub fn buffer_occupied(&self) -> bool {
        let buffer_cells = BOARD_WIDTH as usize * BUFFER_ROWS as usize;
        self.cells[..buffer_cells].iter().any(|cell| cell.is_some())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill a visible row, optionally leaving one column open (for testing)
    pub fn fill_row(&mut self, y: i8, kind: PieceKind, gap: Option<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if Some(x) != gap {
                self.set(x, y, Some(kind));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
