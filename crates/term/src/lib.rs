//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and instead renders into a simple framebuffer that is flushed to
//! the terminal with crossterm.
//!
//! - `core` stays deterministic and testable; views only read snapshots
//! - Each board cell is two columns wide to offset the glyph aspect ratio
//! - Only changed cell runs are written after the first frame

pub mod fb;
pub mod game_view;
pub mod menu;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, AnchorY, GameView, Screen, Viewport};
pub use menu::{menu_for, MenuCursor, MenuItem};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
