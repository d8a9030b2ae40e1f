//! In-process metrics registry.
//!
//! Counters and gauges are plain atomics so request handlers on any runtime
//! worker can mutate them without awaiting. No cross-field invariant is kept:
//! `total_requests` counts every request while the per-method breakdown only
//! knows GET/POST/PUT/DELETE.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;

/// HTTP methods with their own breakdown counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    /// Exact, case-sensitive match. Anything else (PATCH, get, ...) is `None`.
    pub fn classify(method: &str) -> Option<Self> {
        match method {
            "GET" => Some(RequestMethod::Get),
            "POST" => Some(RequestMethod::Post),
            "PUT" => Some(RequestMethod::Put),
            "DELETE" => Some(RequestMethod::Delete),
            _ => None,
        }
    }

    /// Field name used on the wire (`request,source=.. get=N`).
    pub fn as_str(self) -> &'static str {
        match self {
            RequestMethod::Get => "get",
            RequestMethod::Post => "post",
            RequestMethod::Put => "put",
            RequestMethod::Delete => "delete",
        }
    }

    fn index(self) -> usize {
        match self {
            RequestMethod::Get => 0,
            RequestMethod::Post => 1,
            RequestMethod::Put => 2,
            RequestMethod::Delete => 3,
        }
    }
}

/// Login outcome counters as of the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthCounts {
    pub successes: u64,
    pub failures: u64,
}

/// Point-in-time copy of every registry field.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub total_requests: u64,
    pub get_requests: u64,
    pub post_requests: u64,
    pub put_requests: u64,
    pub delete_requests: u64,
    pub auth: AuthCounts,
    pub pizzas_sold: u64,
    pub revenue: f64,
    pub active_users: i64,
    pub latency_samples: usize,
    /// `None` when no sample was recorded yet (serializes as `null`).
    pub avg_latency_ms: Option<f64>,
}

/// Latency samples in milliseconds.
///
/// Unbounded unless a window is configured; the window keeps only the most
/// recent `cap` samples.
#[derive(Debug, Default)]
struct LatencyBuffer {
    samples: VecDeque<f64>,
    cap: Option<usize>,
}

impl LatencyBuffer {
    fn push(&mut self, ms: f64) {
        if let Some(cap) = self.cap {
            while self.samples.len() >= cap {
                self.samples.pop_front();
            }
        }
        self.samples.push_back(ms);
    }

    fn average(&mut self) -> f64 {
        pizzeria_core::derive::average(self.samples.make_contiguous())
    }
}

/// Process-lifetime counters, gauges and the latency sample buffer.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    total_requests: AtomicU64,
    by_method: [AtomicU64; 4],
    auth_successes: AtomicU64,
    auth_failures: AtomicU64,
    pizzas_sold: AtomicU64,
    active_users: AtomicI64,
    /// f64 bits
    revenue: AtomicU64,
    latencies: Mutex<LatencyBuffer>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `window` latency samples instead of the full history.
    pub fn with_latency_window(window: usize) -> Self {
        Self {
            latencies: Mutex::new(LatencyBuffer {
                samples: VecDeque::new(),
                cap: Some(window.max(1)),
            }),
            ..Self::default()
        }
    }

    /// Count a request. Returns the method's new breakdown count when the
    /// method is recognized so the caller can emit it.
    pub fn record_request(&self, method: &str) -> Option<(RequestMethod, u64)> {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        let m = RequestMethod::classify(method)?;
        let n = self.by_method[m.index()].fetch_add(1, Ordering::Relaxed) + 1;
        Some((m, n))
    }

    pub fn record_auth_success(&self) {
        self.auth_successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_auth_failure(&self) {
        self.auth_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// One sold item.
    pub fn record_domain_event(&self) {
        self.pizzas_sold.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_active_users(&self) {
        self.active_users.fetch_add(1, Ordering::Relaxed);
    }

    /// Unclamped: the gauge may go negative.
    pub fn decrement_active_users(&self) {
        self.active_users.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn record_latency(&self, ms: f64) {
        match self.latencies.lock() {
            Ok(mut buf) => buf.push(ms),
            Err(poisoned) => poisoned.into_inner().push(ms),
        }
    }

    pub fn record_revenue(&self, amount: f64) {
        let _ = self
            .revenue
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + amount).to_bits())
            });
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn method_requests(&self, method: RequestMethod) -> u64 {
        self.by_method[method.index()].load(Ordering::Relaxed)
    }

    /// Two independent reads; small skew between them is acceptable.
    pub fn auth_counts(&self) -> AuthCounts {
        AuthCounts {
            successes: self.auth_successes.load(Ordering::Relaxed),
            failures: self.auth_failures.load(Ordering::Relaxed),
        }
    }

    pub fn pizzas_sold(&self) -> u64 {
        self.pizzas_sold.load(Ordering::Relaxed)
    }

    pub fn active_users(&self) -> i64 {
        self.active_users.load(Ordering::Relaxed)
    }

    pub fn revenue(&self) -> f64 {
        f64::from_bits(self.revenue.load(Ordering::Relaxed))
    }

    /// Mean of every retained sample; `NaN` when there are none.
    pub fn average_latency(&self) -> f64 {
        match self.latencies.lock() {
            Ok(mut buf) => buf.average(),
            Err(poisoned) => poisoned.into_inner().average(),
        }
    }

    pub fn latency_samples(&self) -> usize {
        match self.latencies.lock() {
            Ok(buf) => buf.samples.len(),
            Err(poisoned) => poisoned.into_inner().samples.len(),
        }
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let avg = self.average_latency();
        RegistrySnapshot {
            total_requests: self.total_requests(),
            get_requests: self.method_requests(RequestMethod::Get),
            post_requests: self.method_requests(RequestMethod::Post),
            put_requests: self.method_requests(RequestMethod::Put),
            delete_requests: self.method_requests(RequestMethod::Delete),
            auth: self.auth_counts(),
            pizzas_sold: self.pizzas_sold(),
            revenue: self.revenue(),
            active_users: self.active_users(),
            latency_samples: self.latency_samples(),
            avg_latency_ms: (!avg.is_nan()).then_some(avg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_only_for_known_methods() {
        let reg = MetricsRegistry::new();
        assert_eq!(reg.record_request("GET"), Some((RequestMethod::Get, 1)));
        assert_eq!(reg.record_request("GET"), Some((RequestMethod::Get, 2)));
        assert_eq!(reg.record_request("PATCH"), None);
        assert_eq!(reg.record_request("post"), None);
        assert_eq!(reg.total_requests(), 4);
        assert_eq!(reg.method_requests(RequestMethod::Get), 2);
        assert_eq!(reg.method_requests(RequestMethod::Post), 0);
    }

    #[test]
    fn latency_window_drops_oldest() {
        let reg = MetricsRegistry::with_latency_window(2);
        reg.record_latency(100.0);
        reg.record_latency(10.0);
        reg.record_latency(30.0);
        assert_eq!(reg.latency_samples(), 2);
        assert_eq!(reg.average_latency(), 20.0);
    }

    #[test]
    fn snapshot_hides_nan_average() {
        let reg = MetricsRegistry::new();
        assert_eq!(reg.snapshot().avg_latency_ms, None);
        reg.record_latency(4.0);
        assert_eq!(reg.snapshot().avg_latency_ms, Some(4.0));
    }
}
