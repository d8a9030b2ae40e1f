//! Application metrics: in-process registry plus push-based reporting.
//!
//! Nothing here is served for scraping; records are pushed one POST each to
//! the configured time-series endpoint, best effort.

pub mod emit;
pub mod handle;
pub mod metrics;
mod reporter;
pub mod sink;
pub mod system;

pub use emit::Emitter;
pub use handle::{Metrics, OsReadings, ReporterSettings};
pub use metrics::{AuthCounts, MetricsRegistry, RegistrySnapshot, RequestMethod};
pub use sink::{DiscardSink, HttpSink, MetricSink};
pub use system::{FixedProbe, MemorySample, ProcProbe, SystemProbe};
