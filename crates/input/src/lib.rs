//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events onto [`crate::types::Command`] through configurable
//! [`KeyBindings`], and onto [`MenuAction`]s for the non-game screens.

pub mod map;

pub use blockfall_types as types;

pub use map::{
    is_reserved, key_name, menu_action, parse_key, should_quit, KeyBindings, MenuAction,
};
