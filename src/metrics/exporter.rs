use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::SessionCacheMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for session cache snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector. Write errors are
/// dropped; metrics export never disturbs the cache.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<SessionCacheMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &SessionCacheMetricsSnapshot) {
        let counters = [
            ("lookup_calls_total", snapshot.lookup_calls),
            ("lookup_hits_total", snapshot.lookup_hits),
            ("lookup_misses_total", snapshot.lookup_misses),
            ("lookup_expired_total", snapshot.lookup_expired),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_new_total", snapshot.insert_new),
            ("insert_replaced_total", snapshot.insert_replaced),
            ("lru_evictions_total", snapshot.lru_evictions),
            ("sweep_runs_total", snapshot.sweep_runs),
            ("swept_entries_total", snapshot.swept_entries),
            ("flush_calls_total", snapshot.flush_calls),
            ("flushed_entries_total", snapshot.flushed_entries),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", suffix, value);
        }
        self.write_metric("gauge", "cache_len", snapshot.cache_len as u64);
        self.write_metric("gauge", "max_entries", snapshot.max_entries as u64);
    }
}
