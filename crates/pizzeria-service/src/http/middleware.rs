use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

/// Count the request by method before the handler runs, then record its
/// wall time in milliseconds. The response passes through untouched.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let metrics = state.metrics().clone();
    metrics.record_request(req.method().as_str());

    let started = Instant::now();
    let resp = next.run(req).await;
    metrics.record_latency(started.elapsed().as_secs_f64() * 1000.0);

    resp
}
