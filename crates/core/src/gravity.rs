//! Gravity clock - a cancellable periodic tick driven by an external clock.
//!
//! The clock owns no timer. The embedding loop feeds it elapsed time and it
//! reports when the armed interval has run out. Cancelling drops whatever time
//! had accumulated toward the pending tick, so a tick scheduled for an old
//! level, or for a game that has since been paused or ended, can never fire.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityClock {
    interval_ms: u32,
    elapsed_ms: u32,
    armed: bool,
}

impl GravityClock {
    /// A disarmed clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule ticks every `interval_ms` (min 1ms), starting a fresh countdown.
    pub fn arm(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.elapsed_ms = 0;
        self.armed = true;
    }

    /// Stop ticking and forget the pending tick.
    pub fn cancel(&mut self) {
        self.elapsed_ms = 0;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time left until the next tick, if armed.
    pub fn remaining_ms(&self) -> Option<u32> {
        self.armed
            .then(|| self.interval_ms.saturating_sub(self.elapsed_ms))
    }

    /// Feed `elapsed_ms` of wall time.
    ///
    /// Returns `Some(leftover)` when a tick fires, where `leftover` is the part
    /// of `elapsed_ms` past the tick. The caller handles the tick, then feeds
    /// the leftover back in; this lets one long frame fire several ticks, and
    /// lets a re-armed interval take effect between them. Returns `None` when
    /// no tick is due or the clock is disarmed.
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<u32> {
        if !self.armed {
            return None;
        }
        let total = self.elapsed_ms.saturating_add(elapsed_ms);
        if total >= self.interval_ms {
            self.elapsed_ms = 0;
            Some(total - self.interval_ms)
        } else {
            self.elapsed_ms = total;
            None
        }
    }
}
