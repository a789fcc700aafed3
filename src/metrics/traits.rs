//! # Metrics Traits
//!
//! ```text
//!   ┌───────────────────────────────┐
//!   │  SessionCacheMetricsRecorder  │   written by SessionCache
//!   │  lookup / insert / evict /    │
//!   │  sweep / flush                │
//!   └───────────────┬───────────────┘
//!                   │
//!   Consumption (decoupled from recording):
//!   ┌───────────────┴───────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>    │    │ MetricsExporter<S>           │
//!   │ (bench/test)                  │    │ (production monitoring)      │
//!   └───────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by the session cache as it runs.
pub trait SessionCacheMetricsRecorder {
    fn record_lookup_hit(&mut self);
    fn record_lookup_miss(&mut self);
    /// The looked-up entry existed but was stale and has been removed.
    fn record_lookup_expired(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_replace(&mut self);
    fn record_lru_eviction(&mut self);
    fn record_sweep(&mut self, removed: usize);
    fn record_flush(&mut self, removed: usize);
}

/// Produce a point-in-time snapshot of metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publish snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
