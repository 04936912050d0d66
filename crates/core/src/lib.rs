//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to simulate a game lives here, with no UI, timers or I/O.
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Clock-free**: gravity advances only when [`GameEngine::gravity_tick`] is called
//! - **Allocation-free**: the board is a fixed array and shapes are static tables
//!
//! # Module Structure
//!
//! - [`pieces`]: rotation tables for the seven tetrominoes
//! - [`board`]: 20x10 grid with collision checks, locking and line clearing
//! - [`engine`]: active piece, preview, score and the spawn/lock cycle
//! - [`rng`]: seeded uniform piece selection
//! - [`scoring`]: lock and line bonuses
//! - [`snapshot`]: read-only state copies for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each piece is drawn independently, with replacement
//! - **Naive rotation**: rotate in place to the next table entry; no wall kicks
//! - **Immediate lock**: a piece locks as soon as a downward step fails
//! - **Game over at spawn**: the game ends when a new piece does not fit
//!
//! # Example
//!
//! ```
//! use russian_blocks_core::GameEngine;
//!
//! let mut engine = GameEngine::new(12345);
//! engine.start_new_game();
//!
//! engine.try_move(1, 0);
//! engine.try_rotate();
//! engine.hard_drop();
//!
//! assert!(engine.score() > 0);
//! ```

pub mod board;
pub mod engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use russian_blocks_types as types;

pub use board::Board;
pub use engine::{ActivePiece, DropResult, GameEngine, LockEvent};
pub use pieces::{rotation_count, shape_of, RotationState};
pub use rng::{PieceRandomizer, SimpleRng};
pub use scoring::lock_score;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
