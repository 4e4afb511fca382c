//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece (I, O, T, S, Z, J, L) in a uniformly
//! shuffled order. Pieces are drawn from the bag until it is empty, then a
//! fresh, independent permutation replaces it.
//!
//! The generator is a seeded LCG so that games are reproducible in tests.

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a uniformly distributed value in `[0, max)`.
    ///
    /// Uses the high 16 bits of the LCG output (the low bits cycle with short
    /// periods) and rejects the partial bucket at the top of the range so
    /// every value is equally likely. `max` is clamped to `1..=65536`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        let span: u32 = 1 << 16;
        let max = max.min(span);
        let limit = span - span % max;
        loop {
            let v = self.next_u32() >> 16;
            if v < limit {
                return v % max;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state, usable as a seed to replay the stream.
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index of the next undrawn piece; 7 means the bag is exhausted
    bag_index: usize,
    rng: SimpleRng,
}

impl BagRandomizer {
    /// Create a randomizer with the given seed. The first bag is shuffled lazily.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: 7,
            rng: SimpleRng::new(seed),
        }
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece kind, shuffling a new bag when the current one is empty
    pub fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// Draw the next piece in spawn orientation
    pub fn next_piece(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }

    /// Throw away what is left of the current bag.
    ///
    /// The next draw starts a fresh permutation. Used when a new game starts so
    /// that its first seven pieces form a complete bag.
    pub fn discard_bag(&mut self) {
        self.bag_index = self.bag.len();
    }

    /// Pieces left in the current bag before a reshuffle
    pub fn remaining(&self) -> usize {
        self.bag.len() - self.bag_index
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Get current bag for testing/debugging
    #[cfg(test)]
    pub fn current_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for BagRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
