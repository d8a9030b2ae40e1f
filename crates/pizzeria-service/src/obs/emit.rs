//! Fire-and-forget emission primitive.

use std::sync::Arc;

use pizzeria_core::protocol::{MetricLine, MetricValue};

use super::sink::MetricSink;

/// Builds records tagged with this deployment's source and hands them to a
/// detached delivery task.
#[derive(Clone)]
pub struct Emitter {
    source: Arc<str>,
    sink: Arc<dyn MetricSink>,
}

impl Emitter {
    pub fn new(source: impl Into<Arc<str>>, sink: Arc<dyn MetricSink>) -> Self {
        Self {
            source: source.into(),
            sink,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line(&self, prefix: &str, name: &str, value: impl Into<MetricValue>) -> MetricLine {
        MetricLine::new(prefix, &*self.source, name, value)
    }

    pub fn emit(&self, prefix: &str, name: &str, value: impl Into<MetricValue>) {
        self.send(self.line(prefix, name, value));
    }

    /// Spawn delivery and return immediately. Outside a tokio runtime the
    /// record is dropped.
    pub fn send(&self, line: MetricLine) {
        tracing::debug!(metric = %line, "emit");

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(metric = %line, "no async runtime, metric dropped");
            return;
        };

        let sink = Arc::clone(&self.sink);
        handle.spawn(async move {
            let record = line.to_string();
            match sink.push(line).await {
                Ok(()) => tracing::debug!(metric = %record, "pushed"),
                Err(e) => tracing::warn!(
                    metric = %record,
                    code = e.code(),
                    error = %e,
                    "failed to push metrics data"
                ),
            }
        });
    }
}
