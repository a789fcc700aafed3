//! tls-session-cache: bounded client-side TLS session cache.
//!
//! Maps a resumption key to a shared, reference-counted session so a client
//! can resume instead of running a full handshake. The cache is a strict LRU
//! with a fixed entry limit; entries older than the configured timeout are
//! dropped lazily on lookup and in periodic full sweeps.
//!
//! Start with [`SessionCache`] (or `ConcurrentSessionCache` with the
//! `concurrency` feature) and [`SessionCacheConfig`].

pub mod cache;
pub mod clock;
pub mod config;
pub mod ds;
pub mod error;
pub mod handle;
pub mod store;
pub mod sweeper;

#[cfg(feature = "concurrency")]
pub mod concurrent;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use crate::cache::SessionCache;
pub use crate::clock::{Clock, ManualClock, SystemClock};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentSessionCache;
pub use crate::config::SessionCacheConfig;
pub use crate::error::ConfigError;
pub use crate::handle::SessionHandle;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::SessionCacheMetricsSnapshot;
