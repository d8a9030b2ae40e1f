//! pizzeria service library entry.
//!
//! Wires the metrics registry, push reporter, config loader and HTTP surface
//! together. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod http;
pub mod obs;
pub mod router;
