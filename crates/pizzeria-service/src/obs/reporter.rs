//! Periodic reporting loop.
//!
//! Fires one full interval after start, then every interval, forever. Each
//! tick hands its records to independent delivery tasks and returns without
//! waiting, so a slow sink never delays the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::handle::{Metrics, OsReadings};
use super::system::SystemProbe;

pub(crate) fn spawn(
    handle: &Handle,
    metrics: Metrics,
    probe: Arc<dyn SystemProbe>,
    period: Duration,
) {
    handle.spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            // /proc reads are blocking file I/O
            let probe = Arc::clone(&probe);
            let os = tokio::task::spawn_blocking(move || OsReadings::probe(probe.as_ref()))
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "system probe task failed");
                    OsReadings::default()
                });
            for line in metrics.tick_lines(&os) {
                metrics.emitter().send(line);
            }
        }
    });
}
