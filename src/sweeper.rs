//! Amortized expiration.
//!
//! Entries carry no timers. Instead every lookup ticks an
//! [`ExpirationSweeper`]; when the counter reaches the configured period the
//! cache scans all entries once and drops the stale ones, then the counter
//! starts over. Independently, the entry a lookup asks for is checked on the
//! spot, so a stale session is never handed out regardless of sweep cadence.
//!
//! ```text
//!   lookups:   1   2   3  ...  N-1   N    N+1 ...
//!   counter:   1   2   3  ...  N-1   0    1
//!                                    │
//!                                    └── full sweep, O(n)
//! ```

use std::time::{Duration, SystemTime};

/// Whether an entry inserted at `inserted_at` is still usable at `now`.
///
/// Valid iff `0 <= now - inserted_at < timeout`. A clock that moved backward
/// past the insertion instant makes the entry stale rather than extending its
/// life.
#[inline]
pub fn is_fresh(inserted_at: SystemTime, now: SystemTime, timeout: Duration) -> bool {
    match now.duration_since(inserted_at) {
        Ok(age) => age < timeout,
        Err(_) => false,
    }
}

/// Lookup counter that fires a full sweep every `period` lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationSweeper {
    period: u32,
    counter: u32,
}

impl ExpirationSweeper {
    /// # Panics
    ///
    /// Panics if `period` is zero. Configuration validation rejects that value
    /// before a cache is built.
    pub fn new(period: u32) -> Self {
        assert!(period > 0, "expiration sweep period must be greater than zero");
        Self { period, counter: 0 }
    }

    /// Counts one lookup. Returns `true` when a sweep is due; the counter is
    /// already reset when it does.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.period {
            self.counter = 0;
            true
        } else {
            false
        }
    }

    /// Restarts the period, e.g. after an explicitly requested sweep.
    #[inline]
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Lookups counted since the last sweep.
    #[inline]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: SystemTime = SystemTime::UNIX_EPOCH;

    fn at(secs: u64) -> SystemTime {
        T0 + Duration::from_secs(secs)
    }

    #[test]
    fn fresh_within_timeout() {
        let timeout = Duration::from_secs(10);
        assert!(is_fresh(at(100), at(100), timeout));
        assert!(is_fresh(at(100), at(109), timeout));
    }

    #[test]
    fn stale_at_and_after_timeout() {
        let timeout = Duration::from_secs(10);
        assert!(!is_fresh(at(100), at(110), timeout));
        assert!(!is_fresh(at(100), at(5000), timeout));
    }

    #[test]
    fn stale_when_clock_moves_backward() {
        let timeout = Duration::from_secs(10);
        assert!(!is_fresh(at(100), at(99), timeout));
        assert!(!is_fresh(at(100), at(0), timeout));
    }

    #[test]
    fn zero_timeout_is_always_stale() {
        assert!(!is_fresh(at(1), at(1), Duration::ZERO));
    }

    #[test]
    fn tick_fires_every_period() {
        let mut sweeper = ExpirationSweeper::new(3);
        let fired: Vec<bool> = (0..7).map(|_| sweeper.tick()).collect();
        assert_eq!(
            fired,
            vec![false, false, true, false, false, true, false]
        );
        assert_eq!(sweeper.counter(), 1);
    }

    #[test]
    fn period_of_one_fires_every_tick() {
        let mut sweeper = ExpirationSweeper::new(1);
        assert!(sweeper.tick());
        assert!(sweeper.tick());
        assert_eq!(sweeper.counter(), 0);
    }

    #[test]
    fn reset_restarts_period() {
        let mut sweeper = ExpirationSweeper::new(2);
        assert!(!sweeper.tick());
        sweeper.reset();
        assert!(!sweeper.tick());
        assert!(sweeper.tick());
        assert_eq!(sweeper.period(), 2);
    }

    #[test]
    #[should_panic(expected = "greater than zero")]
    fn zero_period_panics() {
        let _ = ExpirationSweeper::new(0);
    }
}
