//! Shared fixtures for service integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use pizzeria_core::error::{PizzeriaError, Result};
use pizzeria_core::protocol::MetricLine;
use pizzeria_service::config::Environment;
use pizzeria_service::obs::{FixedProbe, MemorySample, MetricSink, ReporterSettings};

/// Captures every pushed record as its wire string.
#[derive(Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap().len()
    }
}

#[async_trait]
impl MetricSink for RecordingSink {
    async fn push(&self, line: MetricLine) -> Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// Rejects every record as the ingestion endpoint would with a 500.
#[derive(Default)]
pub struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricSink for FailingSink {
    async fn push(&self, _line: MetricLine) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PizzeriaError::Delivery { status: 500 })
    }
}

pub fn settings(environment: Environment) -> ReporterSettings {
    ReporterSettings {
        environment,
        source: "test-svc".into(),
        interval: Duration::from_secs(10),
        latency_window: None,
    }
}

/// load 1.0 over 4 cores, 3/4 of memory used.
pub fn probe() -> Arc<FixedProbe> {
    Arc::new(FixedProbe {
        load_1m: 1.0,
        cores: 4,
        memory: MemorySample {
            total_bytes: 8_000,
            free_bytes: 2_000,
        },
    })
}

/// Let spawned delivery tasks run until `sink` holds at least `n` records.
pub async fn wait_for(sink: &RecordingSink, n: usize) {
    for _ in 0..1000 {
        if sink.len() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("expected {n} records, got {:?}", sink.lines());
}

/// Let spawned delivery tasks run until `sink` has seen at least `n` pushes.
pub async fn wait_for_attempts(sink: &FailingSink, n: usize) {
    for _ in 0..1000 {
        if sink.attempts() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("expected {n} push attempts, got {}", sink.attempts());
}
