//! Terminal front end: framebuffer rendering and tick scheduling.
//!
//! Screens are drawn into a plain [`FrameBuffer`] by [`SessionView`] and
//! flushed by [`TerminalRenderer`], which only writes glyphs that changed.
//! Nothing here decides game behaviour; it only reads session snapshots.

pub mod fb;
pub mod renderer;
pub mod tick;
pub mod view;

pub use russian_blocks_core as core;
pub use russian_blocks_session as session;
pub use russian_blocks_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use tick::TickScheduler;
pub use view::{SessionView, Viewport};
