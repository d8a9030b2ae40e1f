//! Shared application state for the pizzeria service.
//!
//! Owns the metrics handle for the life of the process; request handlers
//! receive it through axum state instead of a global.

use std::sync::Arc;

use pizzeria_core::error::Result;

use crate::config::ServiceConfig;
use crate::obs::{
    DiscardSink, HttpSink, MetricSink, Metrics, ProcProbe, ReporterSettings, SystemProbe,
};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ServiceConfig>,
    metrics: Metrics,
}

impl AppState {
    /// Build state with the sink and probe implied by `cfg`.
    /// Starts the reporter when `cfg.environment` is production.
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        let sink: Arc<dyn MetricSink> = match &cfg.metrics {
            Some(m) => Arc::new(HttpSink::from_config(m)),
            None => {
                tracing::warn!("no metrics section configured; records will be discarded");
                Arc::new(DiscardSink)
            }
        };
        Self::with_parts(cfg, sink, Arc::new(ProcProbe::default()))
    }

    /// Build state with an explicit sink and probe (tests, embedding).
    pub fn with_parts(
        cfg: ServiceConfig,
        sink: Arc<dyn MetricSink>,
        probe: Arc<dyn SystemProbe>,
    ) -> Result<Self> {
        let settings = ReporterSettings::from_config(&cfg);
        let metrics = Metrics::new(&settings, sink, probe)?;
        Ok(Self {
            cfg: Arc::new(cfg),
            metrics,
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.cfg
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
