//! Scoring module - line-clear bonuses, level thresholds and gravity speed
//!
//! - Clearing 1/2/3/4 rows in one lock awards 100/300/500/4000 points.
//! - Leaving level 1 takes 5000 points; every later level needs
//!   `floor(5000 * 1.2^(level - 2))` cumulative points.
//! - A lock raises the level by at most one, however large the score jump.
//! - Gravity interval is `1000ms * 0.6^min(level - 1, 13)`.

use crate::types::{
    BASE_GRAVITY_MS, FIRST_LEVEL_THRESHOLD, GRAVITY_FACTOR, GRAVITY_LEVEL_CAP,
    LEVEL_THRESHOLD_GROWTH, LINE_CLEAR_BONUS,
};

/// Points for clearing `lines` rows in one lock (0 outside 1..=4)
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_CLEAR_BONUS.get(lines).copied().unwrap_or(0)
}

/// Cumulative score needed to advance past `level`
///
/// ```
/// use blockfall_core::scoring::level_threshold;
///
/// assert_eq!(level_threshold(1), 5000);
/// assert_eq!(level_threshold(2), 5000);
/// assert_eq!(level_threshold(3), 6000);
/// ```
pub fn level_threshold(level: u32) -> u32 {
    if level <= 1 {
        return FIRST_LEVEL_THRESHOLD;
    }
    let exp = (level - 2).min(i32::MAX as u32) as i32;
    let raw = (FIRST_LEVEL_THRESHOLD as f64 * LEVEL_THRESHOLD_GROWTH.powi(exp)).floor();
    // Float-to-int casts saturate, so huge levels clamp to u32::MAX.
    raw as u32
}

/// Level after a lock that left the cumulative score at `score`
pub fn next_level(level: u32, score: u32) -> u32 {
    if score >= level_threshold(level) {
        level.saturating_add(1)
    } else {
        level
    }
}

/// Gravity interval for a level in milliseconds, never below 1ms
pub fn gravity_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1).min(GRAVITY_LEVEL_CAP) as i32;
    let ms = (BASE_GRAVITY_MS * GRAVITY_FACTOR.powi(steps)).round();
    (ms as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_clear_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 4000);
        assert_eq!(line_clear_score(5), 0);
    }

    #[test]
    fn thresholds_grow_from_level_two() {
        assert_eq!(level_threshold(0), 5000);
        assert_eq!(level_threshold(1), 5000);
        assert_eq!(level_threshold(2), 5000);
        assert_eq!(level_threshold(3), 6000);
        assert!(level_threshold(4) > level_threshold(3));
        assert!(level_threshold(10) > level_threshold(9));
        assert_eq!(level_threshold(10_000), u32::MAX);
    }

    #[test]
    fn next_level_is_single_step() {
        assert_eq!(next_level(1, 4999), 1);
        assert_eq!(next_level(1, 5000), 2);
        // Far past several thresholds: still one step.
        assert_eq!(next_level(1, 100_000), 2);
        assert_eq!(next_level(3, 5999), 3);
        assert_eq!(next_level(3, 6000), 4);
    }

    #[test]
    fn gravity_speeds_up_until_level_fourteen() {
        assert_eq!(gravity_interval_ms(1), 1000);
        assert_eq!(gravity_interval_ms(2), 600);
        assert_eq!(gravity_interval_ms(3), 360);

        for level in 1..14 {
            assert!(
                gravity_interval_ms(level + 1) < gravity_interval_ms(level),
                "level {}",
                level
            );
        }
        assert_eq!(gravity_interval_ms(14), gravity_interval_ms(15));
        assert_eq!(gravity_interval_ms(14), gravity_interval_ms(99));
        assert!(gravity_interval_ms(14) >= 1);
    }

    #[test]
    fn level_zero_treated_as_level_one() {
        assert_eq!(gravity_interval_ms(0), 1000);
    }
}
