//! Session layer - menus, pause and game over around the game engine
//!
//! [`SessionController`] owns a [`GameEngine`](crate::core::GameEngine) and maps
//! key presses and timer ticks to engine calls or mode changes:
//!
//! | From | Stimulus | To |
//! |------|----------|----|
//! | MainMenu | Enter on Easy/Medium/Hard | Playing |
//! | Playing | Pause | Paused |
//! | Playing | Escape | MainMenu |
//! | Playing | spawn blocked | GameOver |
//! | Paused | Enter on Resume, Pause, Escape | Playing |
//! | Paused | Enter on New Game | Playing (fresh board) |
//! | Paused | Enter on Main Menu | MainMenu |
//! | GameOver | Enter | MainMenu |
//!
//! The controller never sleeps, spawns threads or exits the process; timer and
//! quit requests are returned as [`Effect`] values for the adapter to act on.
//!
//! # Example
//!
//! ```
//! use russian_blocks_session::{Effect, SessionController};
//! use russian_blocks_types::{Key, SessionMode};
//!
//! let mut session = SessionController::new(7);
//! let effect = session.on_key(Key::Enter); // "Easy"
//! assert!(matches!(effect, Effect::TimerRestarted { interval_ms: 1000, .. }));
//! assert_eq!(session.mode(), SessionMode::Playing);
//!
//! session.on_tick();
//! session.on_key(Key::Pause);
//! assert_eq!(session.on_tick(), Effect::None);
//! ```

pub mod controller;
pub mod menu;

pub use russian_blocks_core as core;
pub use russian_blocks_types as types;

pub use controller::{
    Effect, SessionController, SessionSnapshot, TimerSpec, MAIN_MENU_LEN, PAUSE_MENU_LEN,
};
pub use menu::MenuCursor;
