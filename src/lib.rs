//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under one roof and adds
//! the front-end pieces that tie them together: configuration loading and the
//! key/tick controller used by the `blockfall` binary.

pub mod app;
pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
