//! Top-level facade crate for pizzeria.
//!
//! Re-exports the core primitives and the service library so users can depend on a single crate.

pub mod core {
    pub use pizzeria_core::*;
}

pub mod service {
    pub use pizzeria_service::*;
}
