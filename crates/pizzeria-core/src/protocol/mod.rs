//! Wire contracts for outbound metric records.

pub mod line;

pub use line::{MetricLine, MetricValue};
