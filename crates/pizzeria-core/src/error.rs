//! Shared error type across pizzeria crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, PizzeriaError>;

/// Unified error type used by core and service.
#[derive(Debug, Error)]
pub enum PizzeriaError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("metrics push rejected with status {status}")]
    Delivery { status: u16 },
    #[error("transport: {0}")]
    Transport(String),
    #[error("system probe: {0}")]
    Probe(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PizzeriaError {
    /// Stable code used in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            PizzeriaError::BadConfig(_) => "BAD_CONFIG",
            PizzeriaError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            PizzeriaError::Delivery { .. } => "DELIVERY_FAILED",
            PizzeriaError::Transport(_) => "TRANSPORT",
            PizzeriaError::Probe(_) => "PROBE_FAILED",
            PizzeriaError::Internal(_) => "INTERNAL",
        }
    }
}
