//! Lock-wrapped session cache for sharing across connection tasks.
//!
//! [`ConcurrentSessionCache`] serializes every call through one
//! [`parking_lot::Mutex`]. A lookup mutates recency and the sweep counter, so
//! there is no read-only path and a `RwLock` would buy nothing.
//!
//! Borrowed handles cannot outlive the lock guard, so [`lookup`] returns an
//! acquired [`SessionHandle`] that the caller owns. Use [`lookup_with`] to
//! inspect a session without taking a reference.
//!
//! [`lookup`]: ConcurrentSessionCache::lookup
//! [`lookup_with`]: ConcurrentSessionCache::lookup_with

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::SessionCache;
use crate::clock::Clock;
use crate::config::SessionCacheConfig;
use crate::error::ConfigError;
use crate::handle::SessionHandle;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SessionCacheMetricsSnapshot;

/// Cloneable, thread-safe handle to a shared [`SessionCache`].
pub struct ConcurrentSessionCache<S> {
    inner: Arc<Mutex<SessionCache<S>>>,
}

impl<S> ConcurrentSessionCache<S> {
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn new(config: SessionCacheConfig) -> Self {
        Self::from_cache(SessionCache::new(config))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn try_new(config: SessionCacheConfig) -> Result<Self, ConfigError> {
        SessionCache::try_new(config).map(Self::from_cache)
    }

    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn with_clock(config: SessionCacheConfig, clock: impl Clock + 'static) -> Self {
        Self::from_cache(SessionCache::with_clock(config, clock))
    }

    pub fn from_cache(cache: SessionCache<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn insert(&self, key: &str, session: &SessionHandle<S>) {
        self.inner.lock().insert(key, session);
    }

    /// Returns a new strong reference to the cached session, if fresh.
    pub fn lookup(&self, key: &str) -> Option<SessionHandle<S>> {
        self.inner.lock().lookup(key).map(SessionHandle::acquire)
    }

    /// Runs `f` on the cached session under the lock, without acquiring it.
    pub fn lookup_with<R>(&self, key: &str, f: impl FnOnce(&S) -> R) -> Option<R> {
        let mut cache = self.inner.lock();
        cache.lookup(key).map(|handle| f(handle.session()))
    }

    pub fn flush(&self) {
        self.inner.lock().flush();
    }

    pub fn flush_expired(&self) -> usize {
        self.inner.lock().flush_expired()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn config(&self) -> SessionCacheConfig {
        *self.inner.lock().config()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut SessionCache<S>) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> SessionCacheMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

impl<S> Clone for ConcurrentSessionCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Default for ConcurrentSessionCache<S> {
    fn default() -> Self {
        Self::from_cache(SessionCache::default())
    }
}

impl<S> fmt::Debug for ConcurrentSessionCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f
                .debug_struct("ConcurrentSessionCache")
                .field("cache", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentSessionCache")
                .field("cache", &"<locked>")
                .finish(),
        }
    }
}
