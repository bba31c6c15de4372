//! Countdown timestamps and the level clock they are measured against.

use serde::{Deserialize, Serialize};

/// Monotonic level clock in milliseconds, advanced by the tick driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameClock {
    now_ms: u64,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Advance the clock by the given frame time.
    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }
}

/// A countdown that is either unset or expires at a point on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Timestamp {
    expires_at_ms: Option<u64>,
}

impl Timestamp {
    /// An invalid (unset) timestamp.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Arm the countdown to expire `duration_ms` from now.
    pub fn set(&mut self, clock: &GameClock, duration_ms: u64) {
        self.expires_at_ms = Some(clock.now_ms().saturating_add(duration_ms));
    }

    pub fn valid(&self) -> bool {
        self.expires_at_ms.is_some()
    }

    pub fn invalidate(&mut self) {
        self.expires_at_ms = None;
    }

    /// Whether an armed countdown has run out. Unset timestamps never elapse.
    pub fn elapsed(&self, clock: &GameClock) -> bool {
        self.expires_at_ms
            .is_some_and(|expires| clock.now_ms() >= expires)
    }

    /// Milliseconds until expiry; zero when elapsed or unset.
    pub fn time_remaining_ms(&self, clock: &GameClock) -> u64 {
        self.expires_at_ms
            .map(|expires| expires.saturating_sub(clock.now_ms()))
            .unwrap_or(0)
    }

    pub fn expires_at_ms(&self) -> Option<u64> {
        self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_timestamp() {
        let clock = GameClock::new();
        let ts = Timestamp::invalid();
        assert!(!ts.valid());
        assert!(!ts.elapsed(&clock));
        assert_eq!(ts.time_remaining_ms(&clock), 0);
    }

    #[test]
    fn test_countdown_elapses() {
        let mut clock = GameClock::new();
        let mut ts = Timestamp::invalid();
        ts.set(&clock, 500);

        assert!(ts.valid());
        assert!(!ts.elapsed(&clock));
        assert_eq!(ts.time_remaining_ms(&clock), 500);

        clock.advance(499);
        assert!(!ts.elapsed(&clock));

        clock.advance(1);
        assert!(ts.elapsed(&clock));
        assert_eq!(ts.time_remaining_ms(&clock), 0);
    }

    #[test]
    fn test_invalidate() {
        let mut clock = GameClock::new();
        let mut ts = Timestamp::invalid();
        ts.set(&clock, 10);
        ts.invalidate();
        clock.advance(20);
        assert!(!ts.elapsed(&clock));
    }
}
