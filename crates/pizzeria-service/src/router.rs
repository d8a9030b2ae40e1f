//! Axum router wiring.
//!
//! Every route, including routers merged in by the embedding application,
//! runs behind `track_requests`.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, http};

pub fn build_router(state: AppState) -> Router {
    build_router_with(state, Router::new())
}

/// Merge `api` (e.g. the order/franchise routers) with the ops routes.
pub fn build_router_with(state: AppState, api: Router<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(http::ops::healthz))
        .route("/metrics", get(http::ops::metrics))
        .route("/metrics/auth", get(http::ops::auth_metrics))
        .merge(api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            http::track_requests,
        ))
        .with_state(state)
}
