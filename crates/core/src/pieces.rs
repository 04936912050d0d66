//! Pieces module - tetromino rotation tables
//!
//! Every kind owns a fixed, ordered list of rotation states. A rotation state is
//! a rectangular occupancy mask whose bounding box is the piece footprint; the
//! piece origin is the top-left corner of that box.
//!
//! Rotation indices are taken modulo the kind's state count, so any integer is a
//! valid index and rotating never runs off the end of a table.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Number of occupied cells in every rotation state
pub const PIECE_CELLS: usize = 4;

/// Occupied `(dx, dy)` offsets of a rotation state, relative to its origin
pub type PieceCells = ArrayVec<(i8, i8), PIECE_CELLS>;

/// One orientation of a tetromino, as an occupancy mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    rows: &'static [&'static [u8]],
}

impl RotationState {
    /// Footprint width in cells
    pub fn width(&self) -> u8 {
        self.rows.first().map_or(0, |row| row.len() as u8)
    }

    /// Footprint height in cells
    pub fn height(&self) -> u8 {
        self.rows.len() as u8
    }

    /// Mask rows, top to bottom; non-zero entries are occupied
    pub fn rows(&self) -> &'static [&'static [u8]] {
        self.rows
    }

    pub fn is_occupied(&self, col: u8, row: u8) -> bool {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .is_some_and(|&v| v != 0)
    }

    /// Occupied offsets in row-major order
    pub fn cells(&self) -> PieceCells {
        let mut cells = PieceCells::new();
        for (dy, row) in self.rows.iter().enumerate() {
            for (dx, &v) in row.iter().enumerate() {
                if v != 0 {
                    cells.push((dx as i8, dy as i8));
                }
            }
        }
        cells
    }
}

const T_STATES: [RotationState; 4] = [
    RotationState { rows: &[&[0, 1, 0], &[1, 1, 1]] },
    RotationState { rows: &[&[1, 0], &[1, 1], &[1, 0]] },
    RotationState { rows: &[&[1, 1, 1], &[0, 1, 0]] },
    RotationState { rows: &[&[0, 1], &[1, 1], &[0, 1]] },
];

const S_STATES: [RotationState; 2] = [
    RotationState { rows: &[&[0, 1, 1], &[1, 1, 0]] },
    RotationState { rows: &[&[1, 0], &[1, 1], &[0, 1]] },
];

const L_STATES: [RotationState; 4] = [
    RotationState { rows: &[&[0, 0, 1], &[1, 1, 1]] },
    RotationState { rows: &[&[1, 0], &[1, 0], &[1, 1]] },
    RotationState { rows: &[&[1, 1, 1], &[1, 0, 0]] },
    RotationState { rows: &[&[1, 1], &[0, 1], &[0, 1]] },
];

const J_STATES: [RotationState; 4] = [
    RotationState { rows: &[&[1, 0, 0], &[1, 1, 1]] },
    RotationState { rows: &[&[1, 1], &[1, 0], &[1, 0]] },
    RotationState { rows: &[&[1, 1, 1], &[0, 0, 1]] },
    RotationState { rows: &[&[0, 1], &[0, 1], &[1, 1]] },
];

const I_STATES: [RotationState; 2] = [
    RotationState { rows: &[&[1, 1, 1, 1]] },
    RotationState { rows: &[&[1], &[1], &[1], &[1]] },
];

const O_STATES: [RotationState; 1] = [RotationState { rows: &[&[1, 1], &[1, 1]] }];

const Z_STATES: [RotationState; 2] = [
    RotationState { rows: &[&[1, 1, 0], &[0, 1, 1]] },
    RotationState { rows: &[&[0, 1], &[1, 1], &[1, 0]] },
];

/// All rotation states of a kind, in rotation order
pub fn rotation_states(kind: PieceKind) -> &'static [RotationState] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

/// Number of distinct rotation states of a kind (1, 2 or 4)
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotation_states(kind).len() as u8
}

/// Look up a rotation state; total over every `rotation` via modulo
pub fn shape_of(kind: PieceKind, rotation: i32) -> RotationState {
    let states = rotation_states(kind);
    states[rotation.rem_euclid(states.len() as i32) as usize]
}

/// Rotation index that follows `rotation` for this kind
pub fn next_rotation(kind: PieceKind, rotation: u8) -> u8 {
    (rotation + 1) % rotation_count(kind)
}
