//! HTTP surface owned by the metrics subsystem.
//!
//! - `track_requests`: middleware counting every request and its latency
//! - ops endpoints: `/healthz`, `/metrics`, `/metrics/auth`

pub mod middleware;
pub mod ops;

pub use middleware::track_requests;
