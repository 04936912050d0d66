//! Board module - manages the game grid
//!
//! The board is a 20x10 grid stored as a flat, row-major array of `u8` cells.
//! `0` is empty and `1..=7` is the id of the piece kind that locked there.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Cells above the grid (`y < 0`) count as free so a piece can spawn with rows
//! still hidden above row 0. Everything left, right, or below the grid blocks.

use crate::pieces::RotationState;
use crate::types::{PieceKind, EMPTY_CELL, GRID_COLS, GRID_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = GRID_ROWS as usize * GRID_COLS as usize;

const ROW_LEN: usize = GRID_COLS as usize;

/// Highest cell value the board accepts
const MAX_CELL: u8 = 7;

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * GRID_COLS + x)
    cells: [u8; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(y as usize * ROW_LEN + x as usize)
    }

    pub fn width(&self) -> u8 {
        GRID_COLS
    }

    pub fn height(&self) -> u8 {
        GRID_ROWS
    }

    /// `x` in `[0, GRID_COLS)` and `y` in `[0, GRID_ROWS)`
    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        (0..GRID_COLS as i8).contains(&x) && (0..GRID_ROWS as i8).contains(&y)
    }

    /// Whether a piece cell may occupy `(x, y)`.
    ///
    /// Rows above the grid are free for any in-range column.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if !(0..GRID_COLS as i8).contains(&x) || y >= GRID_ROWS as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        matches!(self.get(x, y), Some(EMPTY_CELL))
    }

    /// Get cell value at (x, y), `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<u8> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y).
    ///
    /// Returns false if out of bounds or `value` is not a valid cell value.
    pub fn set(&mut self, x: i8, y: i8, value: u8) -> bool {
        if value > MAX_CELL {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Whether every occupied cell of `shape` at `(origin_x, origin_y)` is free
    pub fn can_place(&self, shape: &RotationState, origin_x: i8, origin_y: i8) -> bool {
        shape
            .cells()
            .iter()
            .all(|&(dx, dy)| self.is_free(origin_x + dx, origin_y + dy))
    }

    /// Write `kind` into every occupied cell of `shape`.
    ///
    /// Cells that fall outside the grid are dropped.
    pub fn lock(&mut self, shape: &RotationState, origin_x: i8, origin_y: i8, kind: PieceKind) {
        for (dx, dy) in shape.cells() {
            if let Some(idx) = Self::index(origin_x + dx, origin_y + dy) {
                self.cells[idx] = kind.id();
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_ROWS as usize {
            return false;
        }
        let start = y * ROW_LEN;
        self.cells[start..start + ROW_LEN]
            .iter()
            .all(|&cell| cell != EMPTY_CELL)
    }

    /// Remove row `y`, shift every row above it down by one and empty row 0
    fn collapse_row(&mut self, y: usize) {
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * ROW_LEN, ROW_LEN);
        self.cells[..ROW_LEN].fill(EMPTY_CELL);
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Rows are scanned bottom to top. After a row collapses, the same index is
    /// examined again because the row that just moved into it may be full too.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = GRID_ROWS as usize;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.collapse_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(ROW_LEN)
    }

    /// Copy the board into a fixed 2D grid (for snapshots)
    pub fn write_grid(&self, out: &mut [[u8; GRID_COLS as usize]; GRID_ROWS as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` is empty; a digit `1-7` or a piece letter fills the cell.
    #[cfg(any(test, feature = "test-support"))]
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= GRID_ROWS as usize);
        let mut board = Self::new();
        let top = GRID_ROWS as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), ROW_LEN, "row {i} must be {ROW_LEN} wide");
            for (x, ch) in row.chars().enumerate() {
                let value = match ch {
                    '.' => EMPTY_CELL,
                    d @ '1'..='7' => d as u8 - b'0',
                    other => PieceKind::from_str(&other.to_string())
                        .map(PieceKind::id)
                        .unwrap_or_else(|| panic!("bad cell {other:?}")),
                };
                board.cells[(top + i) * ROW_LEN + x] = value;
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
