//! # Client-side TLS Session Cache
//!
//! Maps a resumption key (server identity string) to a shared session handle
//! so repeat connections can skip the full handshake. The handshake layer
//! calls [`insert`](SessionCache::insert), [`lookup`](SessionCache::lookup) and
//! [`flush`](SessionCache::flush); it never sees cache internals.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        SessionCache<S>                           │
//!   │                                                                  │
//!   │   ┌──────────────────────────┐   ┌────────────────────────────┐  │
//!   │   │ EntryStore<S>            │   │ ExpirationSweeper          │  │
//!   │   │  key -> SlotId           │   │  lookup counter, period N  │  │
//!   │   │  RecencyList (MRU..LRU)  │   └────────────────────────────┘  │
//!   │   │  CacheEntry {            │   ┌────────────────────────────┐  │
//!   │   │    key,                  │   │ Box<dyn Clock>             │  │
//!   │   │    SessionHandle<S>,     │   │  SystemClock / ManualClock │  │
//!   │   │    inserted_at }         │   └────────────────────────────┘  │
//!   │   └──────────────────────────┘                                   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Entry lifecycle
//!
//! | Event                       | Effect                                         |
//! |-----------------------------|------------------------------------------------|
//! | `insert` (new key)          | acquire, push at MRU, evict LRU if over limit  |
//! | `insert` (existing key)     | release old, acquire new, push at MRU          |
//! | `lookup` hit                | promote to MRU, return borrowed handle         |
//! | `lookup` on stale entry     | release and remove, report a miss              |
//! | every Nth `lookup`          | release and remove every stale entry           |
//! | `flush`                     | release and remove everything                  |
//!
//! Every entry holds exactly one strong reference on its session. The same
//! session stored under two keys is referenced twice.
//!
//! ## Thread Safety
//!
//! `SessionCache` has no internal synchronization. All calls must be
//! serialized by the owner, either by confining the cache to one task or by
//! putting it behind a lock (see `ConcurrentSessionCache` with the
//! `concurrency` feature).
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use tls_session_cache::prelude::*;
//!
//! let config = SessionCacheConfig::default().with_max_entries(2);
//! let mut cache = SessionCache::new(config);
//!
//! let ticket = SessionHandle::new(vec![0u8; 32]);
//! cache.insert("example.com:443", &ticket);
//! assert_eq!(ticket.strong_count(), 2);
//!
//! let hit = cache.lookup("example.com:443").unwrap();
//! assert!(hit.ptr_eq(&ticket));
//!
//! cache.flush();
//! assert_eq!(cache.size(), 0);
//! assert_eq!(ticket.strong_count(), 1);
//! ```

use std::fmt;
use std::time::{Duration, SystemTime};

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::SessionCacheConfig;
use crate::error::ConfigError;
use crate::handle::SessionHandle;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SessionCacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SessionCacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsSnapshotProvider, SessionCacheMetricsRecorder};
use crate::store::{CacheEntry, EntryStore};
use crate::sweeper::{ExpirationSweeper, is_fresh};

/// Bounded LRU cache of TLS sessions with lazy, amortized expiration.
pub struct SessionCache<S> {
    store: EntryStore<S>,
    config: SessionCacheConfig,
    sweeper: ExpirationSweeper,
    clock: Box<dyn Clock>,
    #[cfg(feature = "metrics")]
    metrics: SessionCacheMetrics,
}

impl<S> SessionCache<S> {
    /// Creates a cache that reads time from the system clock.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. See [`try_new`](Self::try_new).
    pub fn new(config: SessionCacheConfig) -> Self {
        match Self::try_new(config) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error on invalid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_entries` or `expiration_check_count` is
    /// zero.
    pub fn try_new(config: SessionCacheConfig) -> Result<Self, ConfigError> {
        Self::try_with_clock(config, SystemClock)
    }

    /// Creates a cache that reads time from `clock`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn with_clock(config: SessionCacheConfig, clock: impl Clock + 'static) -> Self {
        match Self::try_with_clock(config, clock) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn try_with_clock(
        config: SessionCacheConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: EntryStore::new(),
            config,
            sweeper: ExpirationSweeper::new(config.expiration_check_count),
            clock: Box::new(clock),
            #[cfg(feature = "metrics")]
            metrics: SessionCacheMetrics::default(),
        })
    }

    /// Replaces the time source. Existing entries keep their insertion
    /// instants, which are compared against the new clock from now on.
    pub fn set_clock_for_testing(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    /// Stores `session` under `key`, taking one new strong reference on it.
    ///
    /// An existing entry for `key` is released and replaced. If the cache is
    /// then over `max_entries`, the least recently used entry is evicted.
    pub fn insert(&mut self, key: &str, session: &SessionHandle<S>) {
        if let Some(previous) = self.store.remove(key) {
            trace!(key, "replacing cached session");
            previous.release();
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_replace();
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_new();
        }

        let entry = CacheEntry::new(key, session.acquire(), self.clock.now());
        let displaced = self.store.insert(entry);
        debug_assert!(displaced.is_none());

        if self.store.len() > self.config.max_entries {
            if let Some(evicted) = self.store.pop_lru() {
                debug!(key = evicted.key(), "evicting least recently used session");
                evicted.release();
                #[cfg(feature = "metrics")]
                self.metrics.record_lru_eviction();
            }
        }

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Returns the session stored under `key` if it is present and fresh.
    ///
    /// A hit promotes the entry to most recently used. The returned handle is
    /// borrowed from the cache; [`acquire`](SessionHandle::acquire) it to keep
    /// the session beyond the next cache mutation.
    ///
    /// Every call advances the sweep counter, and every Nth call first removes
    /// all stale entries. A stale entry for `key` itself is removed on the spot
    /// and reported as a miss.
    pub fn lookup(&mut self, key: &str) -> Option<&SessionHandle<S>> {
        let now = self.clock.now();
        if self.sweeper.tick() {
            self.sweep(now);
        }

        let fresh = match self.store.get(key) {
            Some(entry) => is_fresh(entry.inserted_at(), now, self.config.timeout),
            None => {
                trace!(key, "session cache miss");
                #[cfg(feature = "metrics")]
                self.metrics.record_lookup_miss();
                return None;
            },
        };

        if !fresh {
            if let Some(stale) = self.store.remove(key) {
                debug!(key, "dropping expired session on lookup");
                stale.release();
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_lookup_expired();
            #[cfg(debug_assertions)]
            self.validate_invariants();
            return None;
        }

        trace!(key, "session cache hit");
        #[cfg(feature = "metrics")]
        self.metrics.record_lookup_hit();
        self.store.get_and_promote(key).map(CacheEntry::handle)
    }

    /// Releases every entry. The sweep counter is left as is.
    pub fn flush(&mut self) {
        let mut released = 0usize;
        for entry in self.store.drain() {
            entry.release();
            released += 1;
        }
        if released > 0 {
            debug!(released, "flushed session cache");
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_flush(released);
        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Runs a full expiration sweep now and returns how many entries it
    /// released. Restarts the sweep period.
    pub fn flush_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.sweeper.reset();
        self.sweep(now)
    }

    /// Number of live entries, stale ones not yet swept included.
    #[inline]
    pub fn size(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether an entry for `key` is stored, fresh or not.
    ///
    /// Does not count as a lookup and does not affect recency.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.store.keys()
    }

    #[inline]
    pub fn config(&self) -> &SessionCacheConfig {
        &self.config
    }

    #[inline]
    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    #[inline]
    pub fn expiration_check_count(&self) -> u32 {
        self.config.expiration_check_count
    }

    fn sweep(&mut self, now: SystemTime) -> usize {
        let timeout = self.config.timeout;
        let expired = self
            .store
            .extract_if(|entry| is_fresh(entry.inserted_at(), now, timeout));
        let removed = expired.len();
        expired.into_iter().for_each(CacheEntry::release);

        debug!(removed, remaining = self.store.len(), "swept expired sessions");
        #[cfg(feature = "metrics")]
        self.metrics.record_sweep(removed);
        #[cfg(debug_assertions)]
        self.validate_invariants();
        removed
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        self.store.debug_validate_invariants();
        debug_assert!(self.store.len() <= self.config.max_entries);
    }
}

#[cfg(feature = "metrics")]
impl<S> SessionCache<S> {
    pub fn metrics_snapshot(&self) -> SessionCacheMetricsSnapshot {
        self.metrics
            .snapshot(self.store.len(), self.config.max_entries)
    }
}

#[cfg(feature = "metrics")]
impl<S> MetricsSnapshotProvider<SessionCacheMetricsSnapshot> for SessionCache<S> {
    fn snapshot(&self) -> SessionCacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<S> Default for SessionCache<S> {
    /// A cache with the production defaults and the system clock.
    fn default() -> Self {
        Self::new(SessionCacheConfig::default())
    }
}

impl<S> fmt::Debug for SessionCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCache")
            .field("size", &self.size())
            .field("max_entries", &self.config.max_entries)
            .field("timeout", &self.config.timeout)
            .field("lookups_since_sweep", &self.sweeper.counter())
            .field("expiration_check_count", &self.sweeper.period())
            .finish_non_exhaustive()
    }
}
