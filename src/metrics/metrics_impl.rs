use crate::metrics::snapshot::SessionCacheMetricsSnapshot;
use crate::metrics::traits::SessionCacheMetricsRecorder;

/// Plain counters; synchronization, if any, comes from whoever owns the cache.
#[derive(Debug, Default, Clone)]
pub struct SessionCacheMetrics {
    pub lookup_calls: u64,
    pub lookup_hits: u64,
    pub lookup_misses: u64,
    pub lookup_expired: u64,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_replaced: u64,
    pub lru_evictions: u64,
    pub sweep_runs: u64,
    pub swept_entries: u64,
    pub flush_calls: u64,
    pub flushed_entries: u64,
}

impl SessionCacheMetrics {
    pub fn snapshot(&self, cache_len: usize, max_entries: usize) -> SessionCacheMetricsSnapshot {
        SessionCacheMetricsSnapshot {
            lookup_calls: self.lookup_calls,
            lookup_hits: self.lookup_hits,
            lookup_misses: self.lookup_misses,
            lookup_expired: self.lookup_expired,
            insert_calls: self.insert_calls,
            insert_new: self.insert_new,
            insert_replaced: self.insert_replaced,
            lru_evictions: self.lru_evictions,
            sweep_runs: self.sweep_runs,
            swept_entries: self.swept_entries,
            flush_calls: self.flush_calls,
            flushed_entries: self.flushed_entries,
            cache_len,
            max_entries,
        }
    }
}

impl SessionCacheMetricsRecorder for SessionCacheMetrics {
    fn record_lookup_hit(&mut self) {
        self.lookup_calls += 1;
        self.lookup_hits += 1;
    }

    fn record_lookup_miss(&mut self) {
        self.lookup_calls += 1;
        self.lookup_misses += 1;
    }

    // Counted as a miss too; callers cannot tell the two apart.
    fn record_lookup_expired(&mut self) {
        self.lookup_calls += 1;
        self.lookup_misses += 1;
        self.lookup_expired += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_calls += 1;
        self.insert_new += 1;
    }

    fn record_insert_replace(&mut self) {
        self.insert_calls += 1;
        self.insert_replaced += 1;
    }

    fn record_lru_eviction(&mut self) {
        self.lru_evictions += 1;
    }

    fn record_sweep(&mut self, removed: usize) {
        self.sweep_runs += 1;
        self.swept_entries += removed as u64;
    }

    fn record_flush(&mut self, removed: usize) {
        self.flush_calls += 1;
        self.flushed_entries += removed as u64;
    }
}
