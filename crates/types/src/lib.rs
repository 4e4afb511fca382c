//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the input mapping, and the terminal renderer alike.
//!
//! # Playfield
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: (4, 0), i.e. `COLS / 2 - 1`
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Front-end frame step (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `GRAVITY_FACTOR` | 0.6 | Interval multiplier per level |
//! | `GRAVITY_LEVEL_CAP` | 13 | Speed-ups stop after level 14 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, Command, PieceKind, SessionPhase, COLS, ROWS};
//!
//! assert_eq!(PieceKind::T.color(), Color::Purple);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert!(SessionPhase::Playing.accepts_commands());
//! assert_eq!((COLS, ROWS), (10, 20));
//! ```

/// Playfield width in cells.
pub const COLS: u8 = 10;

/// Playfield height in cells.
pub const ROWS: u8 = 20;

/// Column where new pieces spawn (left edge of the shape matrix).
pub const SPAWN_X: i8 = (COLS / 2) as i8 - 1;

/// Row where new pieces spawn (top edge of the shape matrix).
pub const SPAWN_Y: i8 = 0;

/// Front-end frame step in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1.
pub const BASE_GRAVITY_MS: f64 = 1000.0;

/// Each level multiplies the gravity interval by this factor.
pub const GRAVITY_FACTOR: f64 = 0.6;

/// Maximum exponent applied to `GRAVITY_FACTOR` (interval floors at level 14).
pub const GRAVITY_LEVEL_CAP: u32 = 13;

/// Score awarded per lock by number of rows cleared (index = rows).
pub const LINE_CLEAR_BONUS: [u32; 5] = [0, 100, 300, 500, 4000];

/// Score needed to leave level 1.
pub const FIRST_LEVEL_THRESHOLD: u32 = 5000;

/// Growth of the level threshold from level 2 onwards.
pub const LEVEL_THRESHOLD_GROWTH: f64 = 1.2;

/// Smallest allowed look-ahead queue.
pub const MIN_NEXT_PIECES: usize = 1;

/// Largest allowed look-ahead queue.
pub const MAX_NEXT_PIECES: usize = 5;

/// Look-ahead queue length when nothing is configured.
pub const DEFAULT_NEXT_PIECES: usize = 5;

/// The seven piece shapes.
///
/// Declaration order is the catalog order; every bag is a permutation of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Single uppercase letter, as shown in side panels.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Fixed color tag of this shape.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }
}

/// Color identifier stored in locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Orange => "orange",
        }
    }
}

/// A cell on the playfield
///
/// - `None`: empty
/// - `Some(Color)`: filled by a locked piece of that color
pub type Cell = Option<Color>;

/// Discrete input commands accepted by the engine.
///
/// Each maps one-to-one onto a controller operation. Commands are processed
/// fully, one at a time, in delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Move one row down, or lock when blocked
    SoftDrop,
    /// Drop to the lowest valid row and lock
    HardDrop,
    /// Rotate 90° counter-clockwise
    RotateLeft,
    /// Rotate 90° clockwise
    RotateRight,
    /// Stash or swap the active piece
    Hold,
    /// Enter or leave the paused state
    TogglePause,
}

impl Command {
    /// Every command, in binding-table order.
    pub const ALL: [Command; 8] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateLeft,
        Command::RotateRight,
        Command::Hold,
        Command::TogglePause,
    ];

    /// Parse a command from its action name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATERIGHT"), Some(Command::RotateRight));
    /// assert_eq!(Command::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotateleft" => Some(Command::RotateLeft),
            "rotateright" => Some(Command::RotateRight),
            "hold" => Some(Command::Hold),
            "togglepause" | "pause" => Some(Command::TogglePause),
            _ => None,
        }
    }

    /// camelCase action name, as used in key-binding configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateLeft => "rotateLeft",
            Command::RotateRight => "rotateRight",
            Command::Hold => "hold",
            Command::TogglePause => "togglePause",
        }
    }
}

/// Top-level session state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Title,
    Playing,
    Paused,
    GameOver,
    Settings,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Title => "title",
            SessionPhase::Playing => "playing",
            SessionPhase::Paused => "paused",
            SessionPhase::GameOver => "gameover",
            SessionPhase::Settings => "settings",
        }
    }

    /// Whether piece commands (everything but pause) are honoured.
    pub fn accepts_commands(&self) -> bool {
        matches!(self, SessionPhase::Playing)
    }
}
