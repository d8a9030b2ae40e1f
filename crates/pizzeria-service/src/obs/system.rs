//! Host resource probes for the OS-level metrics.
//!
//! `ProcProbe` reads the Linux `/proc` filesystem. On other platforms the
//! reads fail and the reporter emits `NaN` for the affected metric.

use std::fs;
use std::path::PathBuf;

use pizzeria_core::error::{PizzeriaError, Result};

/// Total and free physical memory in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySample {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

pub trait SystemProbe: Send + Sync {
    /// 1-minute load average.
    fn load_average_1m(&self) -> Result<f64>;
    /// Logical core count.
    fn cpu_count(&self) -> usize;
    fn memory(&self) -> Result<MemorySample>;
}

/// Reads `/proc/loadavg` and `/proc/meminfo`.
#[derive(Debug, Clone)]
pub struct ProcProbe {
    root: PathBuf,
}

impl Default for ProcProbe {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path)
            .map_err(|e| PizzeriaError::Probe(format!("read {} failed: {e}", path.display())))
    }
}

impl SystemProbe for ProcProbe {
    fn load_average_1m(&self) -> Result<f64> {
        parse_loadavg(&self.read("loadavg")?)
    }

    fn cpu_count(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    fn memory(&self) -> Result<MemorySample> {
        parse_meminfo(&self.read("meminfo")?)
    }
}

/// First field of `/proc/loadavg`, e.g. `0.52 0.58 0.59 1/467 12345`.
pub fn parse_loadavg(s: &str) -> Result<f64> {
    let first = s
        .split_whitespace()
        .next()
        .ok_or_else(|| PizzeriaError::Probe("empty loadavg".into()))?;
    first
        .parse()
        .map_err(|e| PizzeriaError::Probe(format!("bad loadavg {first:?}: {e}")))
}

/// `MemTotal` and `MemAvailable` (falling back to `MemFree`) from `/proc/meminfo`.
pub fn parse_meminfo(s: &str) -> Result<MemorySample> {
    let mut total = None;
    let mut available = None;
    let mut free = None;

    for line in s.lines() {
        let Some((key, rest)) = line.split_once(':') else { continue };
        let slot = match key.trim() {
            "MemTotal" => &mut total,
            "MemAvailable" => &mut available,
            "MemFree" => &mut free,
            _ => continue,
        };
        // values are in kB
        let kb: u64 = rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| PizzeriaError::Probe(format!("bad meminfo line: {line}")))?;
        *slot = Some(kb.saturating_mul(1024));
    }

    let total_bytes = total.ok_or_else(|| PizzeriaError::Probe("MemTotal missing".into()))?;
    let free_bytes = available
        .or(free)
        .ok_or_else(|| PizzeriaError::Probe("MemAvailable/MemFree missing".into()))?;
    Ok(MemorySample {
        total_bytes,
        free_bytes,
    })
}

/// Constant readings, for tests and hosts without `/proc`.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe {
    pub load_1m: f64,
    pub cores: usize,
    pub memory: MemorySample,
}

impl SystemProbe for FixedProbe {
    fn load_average_1m(&self) -> Result<f64> {
        Ok(self.load_1m)
    }

    fn cpu_count(&self) -> usize {
        self.cores
    }

    fn memory(&self) -> Result<MemorySample> {
        Ok(self.memory)
    }
}
