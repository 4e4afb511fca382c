//! Engine configuration read at the start of each game.

use crate::types::{DEFAULT_NEXT_PIECES, MAX_NEXT_PIECES, MIN_NEXT_PIECES};

/// Clamp a requested look-ahead length into `1..=5`.
///
/// Accepts any integer so configuration layers can pass raw user input.
pub fn clamp_next_pieces_count(requested: i64) -> usize {
    requested.clamp(MIN_NEXT_PIECES as i64, MAX_NEXT_PIECES as i64) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    next_pieces_count: usize,
}

impl GameConfig {
    /// Build a config; `next_pieces_count` is clamped into `1..=5`.
    pub fn new(next_pieces_count: usize) -> Self {
        Self {
            next_pieces_count: next_pieces_count.clamp(MIN_NEXT_PIECES, MAX_NEXT_PIECES),
        }
    }

    pub fn next_pieces_count(&self) -> usize {
        self.next_pieces_count
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            next_pieces_count: DEFAULT_NEXT_PIECES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_five() {
        assert_eq!(GameConfig::default().next_pieces_count(), 5);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(GameConfig::new(0).next_pieces_count(), 1);
        assert_eq!(GameConfig::new(3).next_pieces_count(), 3);
        assert_eq!(GameConfig::new(99).next_pieces_count(), 5);
        assert_eq!(clamp_next_pieces_count(-4), 1);
        assert_eq!(clamp_next_pieces_count(i64::MAX), 5);
    }
}
