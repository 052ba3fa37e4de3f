#![forbid(unsafe_code)]

//! Structured logging shim.
//!
//! With the `tracing` feature the `tracing` macros are re-exported.
//! Without it the same names expand to nothing, so call sites never need
//! their own `cfg` gates.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
