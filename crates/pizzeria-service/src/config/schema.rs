use serde::Deserialize;
use pizzeria_core::error::{PizzeriaError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerSection,

    /// Without this section metrics are still counted but never pushed.
    #[serde(default)]
    pub metrics: Option<MetricsSection>,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PizzeriaError::UnsupportedVersion);
        }

        self.server.validate()?;
        if let Some(m) = &self.metrics {
            m.validate()?;
        }

        Ok(())
    }
}

/// Runtime mode. Only `production` starts the periodic reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[serde(alias = "prod")]
    Production,
    #[default]
    #[serde(alias = "dev")]
    Development,
    Test,
}

impl Environment {
    /// Accepts the config spellings plus the common `prod` / `dev` short forms.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            other => Err(PizzeriaError::BadConfig(format!("unknown environment: {other}"))),
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(PizzeriaError::BadConfig(
                "server.listen must be a valid socket address".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MetricsSection {
    pub source: String,
    pub url: String,
    pub user_id: String,
    pub api_key: String,

    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,

    /// Cap on retained latency samples. Unset keeps the full history.
    #[serde(default)]
    pub latency_window: Option<usize>,
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(PizzeriaError::BadConfig("metrics.source must not be empty".into()));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(PizzeriaError::BadConfig(
                "metrics.url must be an http(s) URL".into(),
            ));
        }
        if !(1000..=3_600_000).contains(&self.report_interval_ms) {
            return Err(PizzeriaError::BadConfig(
                "metrics.reportIntervalMs must be between 1000 and 3600000".into(),
            ));
        }
        if self.latency_window == Some(0) {
            return Err(PizzeriaError::BadConfig(
                "metrics.latencyWindow must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub fn default_report_interval_ms() -> u64 {
    10_000
}
