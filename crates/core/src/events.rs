//! Session events for observers.
//!
//! The session appends an event for every notable transition. Front-ends drain
//! them once per frame with [`crate::Session::take_events`]; when nobody drains,
//! the oldest events are dropped once the buffer is full.

use std::collections::VecDeque;

use crate::types::{PieceKind, SessionPhase};

/// Maximum number of undrained events kept.
pub const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },
    /// A piece was written into the grid.
    PieceLocked {
        kind: PieceKind,
        lines_cleared: u32,
        score_delta: u32,
    },
    LevelUp {
        level: u32,
    },
    Held {
        kind: PieceKind,
    },
    GameOver {
        score: u32,
        level: u32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: VecDeque<SessionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(EVENT_CAPACITY),
        }
    }

    pub fn push(&mut self, event: SessionEvent) {
        if self.events.len() == EVENT_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Remove and return all buffered events, oldest first.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
