//! Time sources for entry staleness checks.
//!
//! The cache never reads ambient time; it asks the [`Clock`] it was built with.
//! [`SystemClock`] wraps the wall clock for production use. [`ManualClock`] is a
//! shared, hand-driven clock for tests that can move forward or backward.
//!
//! Time is [`SystemTime`], not [`std::time::Instant`]. A clock that moves
//! backward past an insertion makes the entry stale, which only a
//! non-monotonic source can express.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

/// Supplies the current time to a session cache.
///
/// Implementations must be shareable across threads so a cache built on them
/// can sit behind a lock.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Production clock backed by [`SystemTime::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Manually advanced clock.
///
/// Clones share the same underlying instant, so a test can hand one clone to a
/// cache and keep another to move time.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tls_session_cache::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// let shared = clock.clone();
///
/// shared.advance(Duration::from_secs(10));
/// assert_eq!(clock.now(), start + Duration::from_secs(10));
///
/// shared.rewind(Duration::from_secs(30));
/// assert!(clock.now() < start);
/// ```
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<SystemTime>>,
}

impl ManualClock {
    /// Starts at a fixed instant well after the Unix epoch, leaving room to
    /// rewind.
    pub fn new() -> Self {
        Self::starting_at(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000))
    }

    pub fn starting_at(start: SystemTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock();
        *now += delta;
    }

    pub fn rewind(&self, delta: Duration) {
        let mut now = self.now.lock();
        *now -= delta;
    }

    pub fn set(&self, instant: SystemTime) {
        *self.now.lock() = instant;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock()
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock")
            .field("now", &self.now())
            .finish()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}
