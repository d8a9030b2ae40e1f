//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use pizzeria_core::error::{PizzeriaError, Result};

pub use schema::{Environment, MetricsSection, ServerSection, ServiceConfig};

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PizzeriaError::BadConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| PizzeriaError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
