//! pizzeria service binary.
//!
//! - Config: first CLI argument or `pizzeria.yaml`, strict YAML
//! - `PIZZERIA_ENV` overrides the configured environment
//! - Metrics reporter runs only in production

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use pizzeria_core::error::{PizzeriaError, Result};
use pizzeria_service::{app_state, config, router};

const DEFAULT_CONFIG: &str = "pizzeria.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let mut cfg = config::load_from_file(&path)?;
    if let Ok(env) = std::env::var("PIZZERIA_ENV") {
        cfg.environment = config::Environment::parse(&env)?;
    }

    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| PizzeriaError::BadConfig(format!("server.listen: {e}")))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "pizzeria-service starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PizzeriaError::Internal(format!("bind failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| PizzeriaError::Internal(format!("server failed: {e}")))
}
