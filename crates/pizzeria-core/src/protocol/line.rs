//! Line-protocol style record: `<prefix>,source=<source> <name>=<value>`.
//!
//! One record per POST body. No timestamp is appended; the sink stamps
//! records on arrival.

use std::fmt;

use bytes::Bytes;

/// Field value of a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    /// Pre-formatted value, emitted verbatim (e.g. memory percentage `"43.21"`).
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Int(v) => write!(f, "{v}"),
            // shortest round-trip form: 20.0 -> "20", NaN -> "NaN"
            MetricValue::Float(v) => write!(f, "{v}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

/// A single outbound record.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLine {
    pub prefix: String,
    pub source: String,
    pub name: String,
    pub value: MetricValue,
}

impl MetricLine {
    pub fn new(
        prefix: impl Into<String>,
        source: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<MetricValue>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            source: source.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// POST body for this record.
    pub fn into_body(self) -> Bytes {
        Bytes::from(self.to_string())
    }
}

impl fmt::Display for MetricLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},source={} {}={}",
            self.prefix, self.source, self.name, self.value
        )
    }
}
