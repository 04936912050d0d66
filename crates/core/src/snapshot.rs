//! Read-only copy of the engine state for renderers.

use crate::engine::ActivePiece;
use crate::pieces::{shape_of, RotationState};
use crate::types::{PieceKind, GRID_COLS, GRID_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    pub fn shape(&self) -> RotationState {
        shape_of(self.kind, self.rotation as i32)
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; GRID_COLS as usize]; GRID_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub running: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn occupied_count(&self) -> usize {
        self.board.iter().flatten().filter(|&&c| c != 0).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; GRID_COLS as usize]; GRID_ROWS as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            running: false,
            game_over: false,
        }
    }
}
