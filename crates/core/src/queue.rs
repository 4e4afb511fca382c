//! Look-ahead piece queue.
//!
//! Holds the next `1..=5` pieces. Consuming the front always backfills one
//! piece from the bag, so the length never changes during a game.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::rng::BagRandomizer;
use crate::types::{MAX_NEXT_PIECES, MIN_NEXT_PIECES};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PieceQueue {
    pieces: ArrayVec<Piece, MAX_NEXT_PIECES>,
}

impl PieceQueue {
    /// An empty queue (no game in progress).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draw `len` pieces from the bag. `len` is clamped to `1..=5`.
    pub fn filled(len: usize, bag: &mut BagRandomizer) -> Self {
        let len = len.clamp(MIN_NEXT_PIECES, MAX_NEXT_PIECES);
        let mut pieces = ArrayVec::new();
        for _ in 0..len {
            pieces.push(bag.next_piece());
        }
        Self { pieces }
    }

    pub fn front(&self) -> Option<&Piece> {
        self.pieces.first()
    }

    /// Pop the front piece and push a fresh one from the bag.
    ///
    /// Returns `None` (and draws nothing) when the queue is empty.
    pub fn advance(&mut self, bag: &mut BagRandomizer) -> Option<Piece> {
        if self.pieces.is_empty() {
            return None;
        }
        let front = self.pieces.remove(0);
        self.pieces.push(bag.next_piece());
        Some(front)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn as_slice(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}
