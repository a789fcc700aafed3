#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionCacheMetricsSnapshot {
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

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub max_entries: usize,
}

impl SessionCacheMetricsSnapshot {
    /// Fraction of lookups that returned a session; `0.0` before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        if self.lookup_calls == 0 {
            0.0
        } else {
            self.lookup_hits as f64 / self.lookup_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_zero_lookups() {
        assert_eq!(SessionCacheMetricsSnapshot::default().hit_ratio(), 0.0);
    }

    #[test]
    fn hit_ratio_divides_hits_by_calls() {
        let snap = SessionCacheMetricsSnapshot {
            lookup_calls: 4,
            lookup_hits: 1,
            ..Default::default()
        };
        assert_eq!(snap.hit_ratio(), 0.25);
    }
}
