//! Optional counters for session cache behavior.
//!
//! Cache code only writes counters through the recorder trait. Monitoring code
//! only reads snapshots.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::SessionCacheMetrics;
pub use snapshot::SessionCacheMetricsSnapshot;
pub use traits::{MetricsExporter, MetricsSnapshotProvider, SessionCacheMetricsRecorder};
