//! Outbound delivery of metric records.
//!
//! Delivery is at-most-once: one POST per record, no retry, no timeout,
//! no batching. Callers never see the outcome; the emitter only logs it.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use pizzeria_core::error::{PizzeriaError, Result};
use pizzeria_core::protocol::MetricLine;

use crate::config::MetricsSection;

/// Destination for emitted records.
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn push(&self, line: MetricLine) -> Result<()>;
}

/// POSTs each record to the ingestion endpoint with a bearer credential.
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
    authorization: String,
}

impl HttpSink {
    pub fn new(url: impl Into<String>, user_id: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            authorization: format!("Bearer {user_id}:{api_key}"),
        }
    }

    pub fn from_config(cfg: &MetricsSection) -> Self {
        Self::new(cfg.url.clone(), &cfg.user_id, &cfg.api_key)
    }
}

#[async_trait]
impl MetricSink for HttpSink {
    async fn push(&self, line: MetricLine) -> Result<()> {
        let resp = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, &self.authorization)
            .body(line.into_body())
            .send()
            .await
            .map_err(|e| PizzeriaError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PizzeriaError::Delivery {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Drops every record. Used when no `metrics` section is configured.
#[derive(Debug, Default)]
pub struct DiscardSink;

#[async_trait]
impl MetricSink for DiscardSink {
    async fn push(&self, _line: MetricLine) -> Result<()> {
        Ok(())
    }
}
