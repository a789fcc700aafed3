pub use crate::cache::SessionCache;
pub use crate::clock::{Clock, ManualClock, SystemClock};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentSessionCache;
pub use crate::config::SessionCacheConfig;
pub use crate::error::ConfigError;
pub use crate::handle::SessionHandle;
#[cfg(feature = "metrics")]
pub use crate::metrics::{MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter};
