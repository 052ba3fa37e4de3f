#![forbid(unsafe_code)]

//! Runtime: interval scheduling, clocks, and the counter lifecycle.
//!
//! [`Scheduler`] coalesces counters that tick on the same interval onto one
//! timer. [`Counter`] ties a `rollex_core::Countdown` to a scheduler and a
//! [`Clock`].

pub mod clock;
pub mod counter;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use counter::Counter;
pub use scheduler::{Scheduler, SubId, Subscription};
