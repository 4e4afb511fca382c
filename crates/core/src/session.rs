//! Session module - the single mutable game object
//!
//! A [`Session`] owns everything that changes while playing: the grid, the
//! active piece, the hold slot, the look-ahead queue, the bag, score, level,
//! the gravity clock and the phase (Title, Playing, Paused, GameOver,
//! Settings). Every operation mutates it in place and returns whether anything
//! changed; rejected commands leave it untouched.
//!
//! Input commands and gravity ticks must reach the session through one
//! dispatch point. The session never blocks and never spawns anything.

use crate::config::GameConfig;
use crate::events::{EventLog, SessionEvent};
use crate::gravity::GravityClock;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::queue::PieceQueue;
use crate::rng::BagRandomizer;
use crate::scoring::{gravity_interval_ms, line_clear_score, next_level};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, SessionPhase, SPAWN_X, SPAWN_Y};

/// The falling piece and where its shape origin sits on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place a piece at the spawn position
    pub fn spawn(piece: Piece) -> Self {
        Self {
            piece,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn collides(&self, grid: &Grid) -> bool {
        grid.collides(&self.piece.shape, self.x, self.y)
    }

    fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute grid coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.piece.cells().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    phase: SessionPhase,
    grid: Grid,
    active: Option<ActivePiece>,
    held: Option<Piece>,
    queue: PieceQueue,
    bag: BagRandomizer,
    score: u32,
    level: u32,
    gravity: GravityClock,
    events: EventLog,
    /// Bumped on every state change; lets renderers skip unchanged frames.
    revision: u64,
}

impl Session {
    /// Create a session on the title screen.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self {
            config,
            phase: SessionPhase::Title,
            grid: Grid::new(),
            active: None,
            held: None,
            queue: PieceQueue::empty(),
            bag: BagRandomizer::new(seed),
            score: 0,
            level: 1,
            gravity: GravityClock::new(),
            events: EventLog::new(),
            revision: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn held(&self) -> Option<Piece> {
        self.held
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scenario setup and tooling.
    ///
    /// Writes bypass collision rules and do not bump the revision.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn gravity(&self) -> &GravityClock {
        &self.gravity
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current RNG state of the bag
    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    /// Drain buffered events, oldest first.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn set_phase(&mut self, to: SessionPhase) {
        let from = self.phase;
        self.phase = to;
        if to == SessionPhase::Playing {
            self.gravity.arm(gravity_interval_ms(self.level));
        } else {
            self.gravity.cancel();
        }
        if from != to {
            self.events.push(SessionEvent::PhaseChanged { from, to });
        }
        self.touch();
    }

    // ============== Lifecycle ==============

    /// Title -> Playing with freshly initialized state.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::Title {
            return false;
        }
        self.begin_game();
        true
    }

    /// Paused/GameOver -> Playing, discarding the current game.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.phase, SessionPhase::Paused | SessionPhase::GameOver) {
            return false;
        }
        self.begin_game();
        true
    }

    /// Paused/GameOver/Settings -> Title. Any game in progress is discarded.
    pub fn back_to_title(&mut self) -> bool {
        if !matches!(
            self.phase,
            SessionPhase::Paused | SessionPhase::GameOver | SessionPhase::Settings
        ) {
            return false;
        }
        self.discard_game();
        self.set_phase(SessionPhase::Title);
        true
    }

    pub fn open_settings(&mut self) -> bool {
        if self.phase != SessionPhase::Title {
            return false;
        }
        self.set_phase(SessionPhase::Settings);
        true
    }

    pub fn close_settings(&mut self) -> bool {
        if self.phase != SessionPhase::Settings {
            return false;
        }
        self.set_phase(SessionPhase::Title);
        true
    }

    /// Change the look-ahead length used by the next game (clamped to 1..=5).
    ///
    /// Only allowed on the title and settings screens.
    pub fn set_next_pieces_count(&mut self, count: usize) -> bool {
        if !matches!(self.phase, SessionPhase::Title | SessionPhase::Settings) {
            return false;
        }
        self.config = GameConfig::new(count);
        self.touch();
        true
    }

    /// Playing <-> Paused. Pausing cancels the pending gravity tick and
    /// resuming schedules a fresh one.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            SessionPhase::Playing => self.set_phase(SessionPhase::Paused),
            SessionPhase::Paused => self.set_phase(SessionPhase::Playing),
            _ => return false,
        }
        true
    }

    fn begin_game(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.level = 1;
        self.held = None;
        self.bag.discard_bag();
        self.active = Some(ActivePiece::spawn(self.bag.next_piece()));
        self.queue = PieceQueue::filled(self.config.next_pieces_count(), &mut self.bag);
        self.set_phase(SessionPhase::Playing);
    }

    fn discard_game(&mut self) {
        self.grid.clear();
        self.active = None;
        self.held = None;
        self.queue.clear();
        self.score = 0;
        self.level = 1;
    }

    fn end_game(&mut self) {
        self.active = None;
        self.set_phase(SessionPhase::GameOver);
        self.events.push(SessionEvent::GameOver {
            score: self.score,
            level: self.level,
        });
    }

    // ============== Commands ==============

    /// Apply an input command
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateLeft => self.rotate_left(),
            Command::RotateRight => self.rotate_right(),
            Command::Hold => self.hold(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    fn playing_piece(&self) -> Option<ActivePiece> {
        if !self.phase.accepts_commands() {
            return None;
        }
        self.active
    }

    fn try_place(&mut self, candidate: ActivePiece) -> bool {
        if candidate.collides(&self.grid) {
            return false;
        }
        self.active = Some(candidate);
        self.touch();
        true
    }

    pub fn move_left(&mut self) -> bool {
        match self.playing_piece() {
            Some(active) => self.try_place(active.shifted(-1, 0)),
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self.playing_piece() {
            Some(active) => self.try_place(active.shifted(1, 0)),
            None => false,
        }
    }

    /// Rotate counter-clockwise in place; rejected if the result collides.
    pub fn rotate_left(&mut self) -> bool {
        match self.playing_piece() {
            Some(active) => self.try_place(ActivePiece {
                piece: active.piece.rotated_left(),
                ..active
            }),
            None => false,
        }
    }

    /// Rotate clockwise in place; rejected if the result collides.
    pub fn rotate_right(&mut self) -> bool {
        match self.playing_piece() {
            Some(active) => self.try_place(ActivePiece {
                piece: active.piece.rotated_right(),
                ..active
            }),
            None => false,
        }
    }

    /// Move down one row, or lock the piece where it is when blocked
    pub fn soft_drop(&mut self) -> bool {
        let Some(active) = self.playing_piece() else {
            return false;
        };
        if !self.try_place(active.shifted(0, 1)) {
            self.lock_and_spawn(active.x, active.y);
        }
        true
    }

    /// Lock the piece at the lowest row it can reach
    pub fn hard_drop(&mut self) -> bool {
        let Some(active) = self.playing_piece() else {
            return false;
        };
        let landing_y = self.landing_y(&active);
        self.lock_and_spawn(active.x, landing_y);
        true
    }

    /// Stash the active piece, or swap it with the held one.
    ///
    /// With an empty hold slot the queue front becomes active and the queue is
    /// backfilled from the bag. The incoming piece always starts at the spawn
    /// position, unchecked. Hold may be used any number of times per piece.
    pub fn hold(&mut self) -> bool {
        let Some(active) = self.playing_piece() else {
            return false;
        };
        let incoming = match self.held {
            Some(held) => held,
            None => match self.queue.advance(&mut self.bag) {
                Some(front) => front,
                None => return false,
            },
        };
        self.held = Some(active.piece);
        self.active = Some(ActivePiece::spawn(incoming));
        self.events.push(SessionEvent::Held {
            kind: active.piece.kind,
        });
        self.touch();
        true
    }

    fn landing_y(&self, active: &ActivePiece) -> i8 {
        let mut y = active.y;
        while !self.grid.collides(&active.piece.shape, active.x, y + 1) {
            y += 1;
        }
        y
    }

    /// Row where the active piece would land if hard-dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|active| self.landing_y(&active))
    }

    /// Lock the active piece at (x, y), then bring in the next one.
    ///
    /// The next piece is checked at the spawn position against the grid as it
    /// is right after locking, before any rows are cleared. If it collides the
    /// game is over: the queue is not advanced and nothing is cleared or
    /// scored.
    fn lock_and_spawn(&mut self, x: i8, y: i8) {
        let Some(active) = self.active.take() else {
            return;
        };
        let kind = active.piece.kind;
        self.grid.lock(&active.piece, x, y);

        let next = self.queue.front().copied();
        let Some(next) = next.filter(|p| !self.grid.collides(&p.shape, SPAWN_X, SPAWN_Y)) else {
            self.events.push(SessionEvent::PieceLocked {
                kind,
                lines_cleared: 0,
                score_delta: 0,
            });
            self.end_game();
            return;
        };

        self.queue.advance(&mut self.bag);
        self.active = Some(ActivePiece::spawn(next));

        let lines = self.grid.clear_completed_rows();
        let score_delta = line_clear_score(lines);
        self.events.push(SessionEvent::PieceLocked {
            kind,
            lines_cleared: lines as u32,
            score_delta,
        });

        if lines > 0 {
            self.score = self.score.saturating_add(score_delta);
            let level = next_level(self.level, self.score);
            if level != self.level {
                self.level = level;
                // Pending tick belonged to the old speed.
                self.gravity.arm(gravity_interval_ms(level));
                self.events.push(SessionEvent::LevelUp { level });
            }
        }

        self.touch();
    }

    // ============== Timing ==============

    /// Advance the gravity clock by `elapsed_ms` and apply every tick that
    /// fell due. Each tick is a soft drop. Returns the number of ticks applied.
    ///
    /// Does nothing unless playing. Stops early when a tick ends the game.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        if !self.phase.accepts_commands() {
            return 0;
        }
        let mut fired = 0;
        let mut pending = elapsed_ms;
        while let Some(rest) = self.gravity.advance(pending) {
            fired += 1;
            self.soft_drop();
            if !self.phase.accepts_commands() {
                break;
            }
            pending = rest;
        }
        fired
    }

    // ============== Snapshots ==============

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.held;
        out.next_queue.clear();
        out.next_queue.extend(self.queue.iter().copied());
        out.score = self.score;
        out.level = self.level;
        out.phase = self.phase;
        out.paused = self.paused();
        out.next_pieces_count = self.config.next_pieces_count();
        out.revision = self.revision;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}
