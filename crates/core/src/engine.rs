//! Game engine - the falling-piece simulation
//!
//! Ties the board, rotation tables, randomizer and scoring together and runs
//! the spawn -> gravity -> lock -> line clear -> respawn cycle.
//!
//! Gravity is discrete: each call to [`GameEngine::gravity_tick`] moves the
//! active piece down one row or locks it. The engine has no clock of its own;
//! whoever owns it decides when ticks happen.

use log::{debug, info};

use crate::board::Board;
use crate::pieces::{next_rotation, shape_of, RotationState};
use crate::rng::PieceRandomizer;
use crate::scoring::lock_score;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{PieceKind, GRID_COLS};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Index into the kind's rotation table
    pub rotation: u8,
    /// Column of the footprint's left edge
    pub x: i8,
    /// Row of the footprint's top edge
    pub y: i8,
}

impl ActivePiece {
    /// Rotation 0, horizontally centred, top row at 0
    pub fn spawn(kind: PieceKind) -> Self {
        let width = shape_of(kind, 0).width() as i8;
        Self {
            kind,
            rotation: 0,
            x: GRID_COLS as i8 / 2 - width / 2,
            y: 0,
        }
    }

    pub fn shape(&self) -> RotationState {
        shape_of(self.kind, self.rotation as i32)
    }

    /// Whether the piece fits on `board` where it stands
    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(&self.shape(), self.x, self.y)
    }
}

/// Result of a one-row downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResult {
    /// The piece moved down one row
    Moved,
    /// The piece was resting and has been locked
    Locked,
    /// Nothing to drop (no active piece, stopped, or game over)
    Idle,
}

/// What the most recent lock did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_gained: u32,
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    pieces: PieceRandomizer,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    last_event: Option<LockEvent>,
    running: bool,
    game_over: bool,
}

impl GameEngine {
    /// Create an idle engine; call [`GameEngine::start_new_game`] to play
    pub fn new(seed: u32) -> Self {
        let mut pieces = PieceRandomizer::new(seed);
        let next = pieces.draw();
        Self {
            board: Board::new(),
            active: None,
            next,
            pieces,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            last_event: None,
            running: false,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Kind that will spawn after the active piece (always at rotation 0)
    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// A game is in progress and accepting moves
    pub fn is_running(&self) -> bool {
        self.running && !self.game_over
    }

    pub fn seed(&self) -> u32 {
        self.pieces.seed()
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Reset board and score, pick a fresh preview and spawn the first piece
    pub fn start_new_game(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.last_event = None;
        self.game_over = false;
        self.running = true;
        self.next = self.pieces.draw();
        self.spawn();
    }

    /// Halt the current game without touching the board (leaving to the menu)
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Promote the preview to the active piece and draw a new preview.
    ///
    /// Returns false and sets game over when the new piece does not fit. The
    /// board is never written by a failed spawn.
    pub fn spawn(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.next);
        self.next = self.pieces.draw();

        if !piece.fits(&self.board) {
            info!(
                "spawn blocked for {:?}, game over with score {}",
                piece.kind, self.score
            );
            self.active = None;
            self.game_over = true;
            self.running = false;
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Shift the active piece; no state change when the target collides
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let (Some(x), Some(y)) = (active.x.checked_add(dx), active.y.checked_add(dy)) else {
            return false;
        };
        if !self.board.can_place(&active.shape(), x, y) {
            return false;
        }

        self.active = Some(ActivePiece { x, y, ..active });
        true
    }

    /// Advance to the next rotation state in place.
    ///
    /// No kicks: if the rotated shape collides at the same origin the rotation fails.
    pub fn try_rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            rotation: next_rotation(active.kind, active.rotation),
            ..active
        };
        if !rotated.fits(&self.board) {
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// Move down one row, or lock if resting
    pub fn soft_drop(&mut self) -> DropResult {
        if !self.is_running() || self.active.is_none() {
            return DropResult::Idle;
        }
        if self.try_move(0, 1) {
            DropResult::Moved
        } else {
            self.lock_and_advance();
            DropResult::Locked
        }
    }

    /// Drop straight down until resting, then lock. Returns rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_running() || self.active.is_none() {
            return 0;
        }
        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.lock_and_advance();
        distance
    }

    /// One timer-driven gravity step; same effect as [`GameEngine::soft_drop`]
    pub fn gravity_tick(&mut self) -> DropResult {
        self.soft_drop()
    }

    /// Lock the active piece, score it, clear lines and spawn the next piece
    pub fn lock_and_advance(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.lock(&active.shape(), active.x, active.y, active.kind);
        let cleared = self.board.clear_full_rows();
        let gained = lock_score(cleared);

        self.score = self.score.saturating_add(gained);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.pieces_locked = self.pieces_locked.saturating_add(1);
        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared: cleared as u32,
            score_gained: gained,
        });
        debug!(
            "locked {:?} at ({}, {}), cleared {} line(s), score {}",
            active.kind, active.x, active.y, cleared, self.score
        );

        self.spawn();
    }

    /// Row the active piece would land on if hard-dropped
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let shape = active.shape();
        let mut y = active.y;
        while self.board.can_place(&shape, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_locked = self.pieces_locked;
        out.running = self.is_running();
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece (fixtures only; no collision check)
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }

    /// Replace the preview piece (fixtures only)
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}
