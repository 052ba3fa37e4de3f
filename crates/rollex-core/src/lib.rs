#![forbid(unsafe_code)]

//! Core: countdown arithmetic, digit formatting, validation, and counter state.
//!
//! This crate has no threads and no clock. Time enters only as the `now_ms`
//! argument of [`Countdown::new`] and [`Countdown::tick`]; scheduling lives in
//! `rollex-runtime`.

pub mod calculator;
pub mod countdown;
pub mod digits;
pub mod error;
pub mod label;
pub mod logging;
pub mod period;
pub mod props;
pub mod segment;
pub mod settings;
pub mod validate;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};

pub use countdown::{Countdown, Snapshot, Tick};
pub use digits::{DigitBounds, DigitDecorator, DigitWrapper};
pub use error::{ConfigError, PeriodField};
pub use period::{Period, PeriodMap};
pub use props::{CounterProps, DigitCount, LabelFn, Labels};
pub use segment::{DigitLane, LaneMove, Segment, display_width, render_line};
pub use settings::{Direction, DisplayMode, Settings, TimeSource};
pub use validate::validate;
