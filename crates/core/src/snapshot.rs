//! Read-only render snapshot of a session.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::session::ActivePiece;
use crate::types::{Cell, SessionPhase, COLS, DEFAULT_NEXT_PIECES, MAX_NEXT_PIECES, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            piece: value.piece,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute grid coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.piece.cells().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; COLS as usize]; ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on if hard-dropped now.
    pub ghost_y: Option<i8>,
    pub hold: Option<Piece>,
    pub next_queue: ArrayVec<Piece, MAX_NEXT_PIECES>,
    pub score: u32,
    pub level: u32,
    pub phase: SessionPhase,
    pub paused: bool,
    /// Look-ahead length the next game will use.
    pub next_pieces_count: usize,
    pub revision: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; COLS as usize]; ROWS as usize];
        self.active = None;
        self.ghost_y = None;
        self.hold = None;
        self.next_queue.clear();
        self.score = 0;
        self.level = 1;
        self.phase = SessionPhase::Title;
        self.paused = false;
        self.next_pieces_count = DEFAULT_NEXT_PIECES;
        self.revision = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase.accepts_commands()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; COLS as usize]; ROWS as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next_queue: ArrayVec::new(),
            score: 0,
            level: 1,
            phase: SessionPhase::Title,
            paused: false,
            next_pieces_count: DEFAULT_NEXT_PIECES,
            revision: 0,
        }
    }
}
