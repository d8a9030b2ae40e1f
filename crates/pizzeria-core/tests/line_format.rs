//! Outbound record formatting.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pizzeria_core::protocol::{MetricLine, MetricValue};

#[test]
fn renders_prefix_source_name_value() {
    let line = MetricLine::new("request", "jwt-pizza-service", "get", 3u64);
    assert_eq!(line.to_string(), "request,source=jwt-pizza-service get=3");
}

#[test]
fn whole_floats_render_without_fraction() {
    let line = MetricLine::new("revenue", "svc", "total", 20.0);
    assert_eq!(line.to_string(), "revenue,source=svc total=20");

    let line = MetricLine::new("revenue", "svc", "total", 0.0055);
    assert_eq!(line.to_string(), "revenue,source=svc total=0.0055");
}

#[test]
fn nan_is_emitted_as_is() {
    let line = MetricLine::new("avg_latency", "svc", "making_pizza", f64::NAN);
    assert_eq!(line.to_string(), "avg_latency,source=svc making_pizza=NaN");
}

#[test]
fn negative_gauge_and_text_values() {
    let line = MetricLine::new("active", "svc", "users", -2i64);
    assert_eq!(line.to_string(), "active,source=svc users=-2");

    let line = MetricLine::new("osMetrics", "svc", "memory", "43.21".to_string());
    assert_eq!(line.value, MetricValue::Text("43.21".into()));
    assert_eq!(line.to_string(), "osMetrics,source=svc memory=43.21");
}

#[test]
fn body_matches_display() {
    let line = MetricLine::new("auth", "svc", "failed", 1u64);
    let expected = line.to_string();
    assert_eq!(line.into_body().as_ref(), expected.as_bytes());
}
