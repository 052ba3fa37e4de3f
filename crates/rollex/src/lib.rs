#![forbid(unsafe_code)]

//! Rollex public facade crate.
//!
//! Countdown and count-up counters broken into days, hours, minutes and
//! seconds, in any radix from 2 to 36, with the data a renderer needs for
//! static or rolling digits. This crate re-exports the stable surface of the
//! internal crates and offers a small prelude.
//!
//! # Example
//!
//! ```rust
//! use rollex::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let scheduler = Scheduler::manual();
//! let props = CounterProps::new().seconds(75).max_period("minutes").separator(":");
//! let counter = Counter::with_clock(&props, &scheduler, Arc::new(ManualClock::new(0)))?;
//! counter.mount();
//! scheduler.fire(Duration::from_secs(1));
//!
//! assert_eq!(render_line(&counter.segments()), "1 minutes:14 seconds");
//! # Ok::<(), rollex::ConfigError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use rollex_core::{
    ConfigError, Countdown, CounterProps, DigitBounds, DigitCount, DigitLane, DigitWrapper,
    Direction, DisplayMode, LabelFn, Labels, LaneMove, Period, PeriodField, PeriodMap, Segment,
    Settings, Snapshot, Tick, TimeSource, display_width, render_line, validate,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use rollex_runtime::{
    Clock, Counter, ManualClock, Scheduler, SubId, Subscription, SystemClock,
};

/// Standard result type for rollex APIs.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Builds a counter on the system clock and mounts it.
///
/// Frozen counters are built but not started.
#[cfg(feature = "runtime")]
pub fn create(props: &CounterProps, scheduler: &Scheduler) -> Result<Counter> {
    let counter = Counter::create(props, scheduler)?;
    counter.mount();
    Ok(counter)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ConfigError, Countdown, CounterProps, DigitCount, Labels, Period, Result, Segment,
        Snapshot, Tick, render_line,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{Clock, Counter, ManualClock, Scheduler, SystemClock};

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use rollex_core as core;
#[cfg(feature = "runtime")]
pub use rollex_runtime as runtime;
