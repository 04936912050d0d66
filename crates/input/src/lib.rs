//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::Key`] and tracks which keys
//! are held, so edge-triggered actions work on terminals with and without
//! key-release events.

pub mod map;
pub mod tracker;

pub use russian_blocks_types as types;

pub use map::{map_key, should_quit};
pub use tracker::{KeyInput, KeyTracker, DEFAULT_KEY_RELEASE_TIMEOUT_MS, MAX_HELD_KEYS};
