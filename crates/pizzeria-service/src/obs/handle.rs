//! `Metrics`: the handle injected into request handlers.
//!
//! Bundles the registry with the emitter so that mutations which also emit
//! (per-method request counters) stay a single synchronous call. Cloning is
//! cheap; every clone shares the same registry.

use std::sync::Arc;
use std::time::Duration;

use pizzeria_core::derive;
use pizzeria_core::error::{PizzeriaError, Result};
use pizzeria_core::protocol::{MetricLine, MetricValue};

use crate::config::{schema::default_report_interval_ms, Environment, ServiceConfig};

use super::emit::Emitter;
use super::metrics::{AuthCounts, MetricsRegistry, RegistrySnapshot};
use super::reporter;
use super::sink::MetricSink;
use super::system::SystemProbe;

const UNCONFIGURED_SOURCE: &str = "unconfigured";

/// Construction-time knobs for [`Metrics`].
#[derive(Debug, Clone)]
pub struct ReporterSettings {
    pub environment: Environment,
    pub source: String,
    pub interval: Duration,
    pub latency_window: Option<usize>,
}

impl ReporterSettings {
    pub fn from_config(cfg: &ServiceConfig) -> Self {
        match &cfg.metrics {
            Some(m) => Self {
                environment: cfg.environment,
                source: m.source.clone(),
                interval: Duration::from_millis(m.report_interval_ms),
                latency_window: m.latency_window,
            },
            None => Self {
                environment: cfg.environment,
                source: UNCONFIGURED_SOURCE.to_string(),
                interval: Duration::from_millis(default_report_interval_ms()),
                latency_window: None,
            },
        }
    }
}

/// OS readings taken once per tick. `None` means the probe failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsReadings {
    pub load_1m: Option<f64>,
    pub cores: usize,
    pub memory: Option<(u64, u64)>,
}

impl OsReadings {
    pub fn probe(probe: &dyn SystemProbe) -> Self {
        let load_1m = probe
            .load_average_1m()
            .map_err(|e| tracing::warn!(code = e.code(), error = %e, "load average unavailable"))
            .ok();
        let memory = probe
            .memory()
            .map_err(|e| tracing::warn!(code = e.code(), error = %e, "memory stats unavailable"))
            .ok()
            .map(|m| (m.total_bytes, m.free_bytes));
        Self {
            load_1m,
            cores: probe.cpu_count(),
            memory,
        }
    }

    pub fn cpu_percent(&self) -> f64 {
        self.load_1m
            .map(|l| derive::cpu_percent(l, self.cores))
            .unwrap_or(f64::NAN)
    }

    pub fn memory_percent(&self) -> String {
        self.memory
            .map(|(total, free)| derive::memory_percent(total, free))
            .unwrap_or_else(|| f64::NAN.to_string())
    }
}

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<MetricsRegistry>,
    emitter: Emitter,
    reporting: bool,
}

impl Metrics {
    /// Build the registry and, in production, start the periodic reporter.
    ///
    /// Production requires a running tokio runtime and a non-zero interval;
    /// the reporter task is detached and ends with the runtime.
    pub fn new(
        settings: &ReporterSettings,
        sink: Arc<dyn MetricSink>,
        probe: Arc<dyn SystemProbe>,
    ) -> Result<Self> {
        let registry = match settings.latency_window {
            Some(n) => MetricsRegistry::with_latency_window(n),
            None => MetricsRegistry::new(),
        };
        let mut metrics = Self {
            registry: Arc::new(registry),
            emitter: Emitter::new(settings.source.as_str(), sink),
            reporting: false,
        };

        if settings.environment.is_production() {
            if settings.interval.is_zero() {
                return Err(PizzeriaError::BadConfig(
                    "metrics report interval must be non-zero".into(),
                ));
            }
            let handle = tokio::runtime::Handle::try_current().map_err(|_| {
                PizzeriaError::Internal("metrics reporter requires a tokio runtime".into())
            })?;
            metrics.reporting = true;
            reporter::spawn(&handle, metrics.clone(), probe, settings.interval);
            tracing::info!(
                source = %settings.source,
                interval_ms = settings.interval.as_millis() as u64,
                "metrics reporter started"
            );
        } else {
            tracing::info!(environment = ?settings.environment, "metrics reporter disabled");
        }

        Ok(metrics)
    }

    /// Whether the periodic reporter was started.
    pub fn is_reporting(&self) -> bool {
        self.reporting
    }

    pub fn registry(&self) -> &MetricsRegistry {
        &self.registry
    }

    /// Count a request; recognized methods also push their counter right away.
    pub fn record_request(&self, method: &str) {
        if let Some((m, n)) = self.registry.record_request(method) {
            self.emitter.emit("request", m.as_str(), n);
        }
    }

    pub fn record_auth_success(&self) {
        self.registry.record_auth_success();
    }

    pub fn record_auth_failure(&self) {
        self.registry.record_auth_failure();
    }

    pub fn auth_counts(&self) -> AuthCounts {
        self.registry.auth_counts()
    }

    pub fn record_domain_event(&self) {
        self.registry.record_domain_event();
    }

    pub fn increment_active_users(&self) {
        self.registry.increment_active_users();
    }

    pub fn decrement_active_users(&self) {
        self.registry.decrement_active_users();
    }

    pub fn record_latency(&self, ms: f64) {
        self.registry.record_latency(ms);
    }

    pub fn record_revenue(&self, amount: f64) {
        self.registry.record_revenue(amount);
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.registry.snapshot()
    }

    /// The records of one reporting tick, in emission order.
    pub fn tick_lines(&self, os: &OsReadings) -> Vec<MetricLine> {
        let reg = &self.registry;
        let auth = reg.auth_counts();
        let avg = reg.average_latency();
        tracing::debug!(avg_latency_ms = avg, "latency average");

        let e = &self.emitter;
        vec![
            e.line("request", "all", reg.total_requests()),
            e.line("avg_latency", "making_pizza", avg),
            e.line("auth", "failed", auth.failures),
            e.line("auth", "successful", auth.successes),
            e.line("pizza", "number_sold", reg.pizzas_sold()),
            e.line("revenue", "total", reg.revenue()),
            e.line("active", "users", reg.active_users()),
            e.line("osMetrics", "cpu", os.cpu_percent()),
            e.line("osMetrics", "memory", MetricValue::Text(os.memory_percent())),
        ]
    }

    pub(crate) fn emitter(&self) -> &Emitter {
        &self.emitter
    }
}
