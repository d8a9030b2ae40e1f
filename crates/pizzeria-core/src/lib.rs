//! pizzeria core: transport-agnostic metric primitives and the shared error type.
//!
//! This crate defines the line record pushed to the time-series sink, the pure
//! derivations computed on every reporting tick, and the error surface shared
//! by the service crate. It carries no runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Derivations over degenerate input (empty sample sets, zero totals) return
//! `NaN` instead of failing.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod derive;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{PizzeriaError, Result};
