//! Russian Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests and benches can use `russian_blocks::{core, session, input, term, types}`.

pub use russian_blocks_core as core;
pub use russian_blocks_input as input;
pub use russian_blocks_session as session;
pub use russian_blocks_term as term;
pub use russian_blocks_types as types;
