//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules and the session state machine. It has no
//! dependency on a terminal, a clock, or any other I/O:
//!
//! - **Deterministic**: the same seed and the same command/tick sequence
//!   produce the same game
//! - **Clock-free**: gravity is driven by elapsed time fed in by the caller
//! - **Allocation-light**: the grid, queue and snapshots live in fixed storage
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven-shape catalog and matrix rotation
//! - [`rng`]: seeded LCG and 7-bag randomizer
//! - [`queue`]: fixed-length look-ahead queue fed by the bag
//! - [`grid`]: 10x20 playfield with collision, locking and row clearing
//! - [`scoring`]: line-clear bonus, level thresholds, gravity speed
//! - [`gravity`]: cancellable gravity countdown
//! - [`session`]: active piece controller and phase machine
//! - [`events`]: buffered session events for observers
//! - [`snapshot`]: read-only render snapshot
//!
//! # Rules
//!
//! - Rotation has no wall kicks; a blocked rotation is simply rejected
//! - Hold swaps freely, with no once-per-drop limit
//! - Locking scores 0/100/300/500/4000 for 0-4 cleared rows
//! - A level is gained (at most one per lock) when a clearing lock brings the
//!   score to the current level's threshold
//! - Gravity starts at 1000ms and speeds up by a factor of 0.6 per level
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, Session};
//! use blockfall_core::types::{Command, SessionPhase};
//!
//! let mut session = Session::new(GameConfig::new(3), 12345);
//! assert!(session.start());
//! assert_eq!(session.queue().len(), 3);
//!
//! session.apply(Command::MoveRight);
//! session.apply(Command::RotateRight);
//! assert!(session.apply(Command::HardDrop));
//! assert_eq!(session.grid().filled_count(), 4);
//!
//! session.apply(Command::TogglePause);
//! assert_eq!(session.phase(), SessionPhase::Paused);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) every frame with the elapsed
//! milliseconds; each expired gravity interval is applied as one soft drop.

pub mod config;
pub mod events;
pub mod gravity;
pub mod grid;
pub mod pieces;
pub mod queue;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use config::GameConfig;
pub use events::SessionEvent;
pub use gravity::GravityClock;
pub use grid::Grid;
pub use pieces::{catalog, Piece, Shape};
pub use queue::PieceQueue;
pub use rng::{BagRandomizer, SimpleRng};
pub use scoring::{gravity_interval_ms, level_threshold, line_clear_score, next_level};
pub use session::{ActivePiece, Session};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
