#![forbid(unsafe_code)]

//! Countdown state machine.
//!
//! A [`Countdown`] owns the remaining time and the per-period numbers
//! derived from it. It knows nothing about clocks or timers: the caller
//! passes the current time into [`Countdown::tick`].
//!
//! # Example
//!
//! ```rust
//! use rollex_core::countdown::{Countdown, Tick};
//! use rollex_core::period::Period;
//! use rollex_core::props::CounterProps;
//!
//! let mut countdown = Countdown::new(&CounterProps::new().seconds(2), 0).unwrap();
//! assert_eq!(countdown.snapshot().digits[Period::Seconds], vec!['0', '2']);
//!
//! assert_eq!(countdown.tick(1_000), Tick::Advanced);
//! assert_eq!(countdown.tick(2_000), Tick::Finished);
//! assert_eq!(countdown.tick(3_000), Tick::Idle);
//! assert_eq!(countdown.snapshot().digits[Period::Seconds], vec!['0', '0']);
//! ```

use crate::calculator::{display_ts, period_digits, period_numbers};
use crate::error::ConfigError;
use crate::period::{Period, PeriodMap};
use crate::props::CounterProps;
use crate::segment::{Segment, build_segments};
use crate::settings::{Settings, TimeSource};

/// Outcome of one [`Countdown::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Moved forward; more ticks to come.
    Advanced,
    /// Reached the terminal bound on this tick.
    Finished,
    /// Already finished; nothing changed.
    Idle,
}

/// Point-in-time view of a countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub remaining_ms: u64,
    pub numbers: PeriodMap<u64>,
    pub digits: PeriodMap<Vec<char>>,
}

/// Remaining time plus its per-period breakdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    settings: Settings,
    remaining_ms: u64,
    numbers: PeriodMap<u64>,
    finished: bool,
}

impl Countdown {
    /// Validates `props` and initialises at `now_ms`.
    pub fn new(props: &CounterProps, now_ms: i64) -> Result<Self, ConfigError> {
        Ok(Self::from_settings(Settings::from_props(props, now_ms)?))
    }

    /// Starts from already normalised settings.
    pub fn from_settings(settings: Settings) -> Self {
        let remaining_ms = settings.initial_ms;
        let mut countdown = Self {
            settings,
            remaining_ms,
            numbers: PeriodMap::new(),
            finished: remaining_ms == 0,
        };
        countdown.recompute();
        countdown
    }

    /// Advances by one interval, or resynchronises to `now_ms` in sync mode.
    ///
    /// Remaining time never increases and never goes below zero.
    pub fn tick(&mut self, now_ms: i64) -> Tick {
        if self.finished {
            return Tick::Idle;
        }
        let current = i64::try_from(self.remaining_ms).unwrap_or(i64::MAX);
        let next = match (self.settings.sync_time, self.settings.source) {
            (true, TimeSource::Range { from_ms, to_ms }) => {
                let elapsed = now_ms.saturating_sub(self.settings.created_at_ms);
                to_ms
                    .saturating_sub(from_ms)
                    .saturating_sub(elapsed)
                    .min(current)
            }
            _ => {
                let step = i64::try_from(self.settings.interval_ms).unwrap_or(i64::MAX);
                current.saturating_sub(step)
            }
        };

        if next <= 0 {
            self.remaining_ms = 0;
            self.finished = true;
            self.recompute();
            crate::debug!(initial_ms = self.settings.initial_ms, "countdown finished");
            Tick::Finished
        } else {
            self.remaining_ms = u64::try_from(next).unwrap_or_default();
            self.recompute();
            crate::trace!(remaining_ms = self.remaining_ms, "countdown tick");
            Tick::Advanced
        }
    }

    fn recompute(&mut self) {
        let ts = display_ts(
            self.settings.direction,
            self.settings.initial_ms,
            self.remaining_ms,
        );
        self.numbers = period_numbers(self.settings.periods, ts);
    }

    /// Digit sequences for the current numbers.
    pub fn digits(&self) -> PeriodMap<Vec<char>> {
        period_digits(&self.numbers, &self.settings.bounds, self.settings.radix)
    }

    pub fn numbers(&self) -> &PeriodMap<u64> {
        &self.numbers
    }

    pub fn number(&self, period: Period) -> Option<u64> {
        self.numbers.get(period).copied()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            remaining_ms: self.remaining_ms,
            numbers: self.numbers.clone(),
            digits: self.digits(),
        }
    }

    /// Renderer-facing view of the current state.
    pub fn segments(&self) -> Vec<Segment> {
        build_segments(&self.settings, &self.numbers, &self.digits())
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn initial_ms(&self) -> u64 {
        self.settings.initial_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.settings.initial_ms.saturating_sub(self.remaining_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(props: CounterProps) -> Countdown {
        Countdown::new(&props, 0).expect("valid props")
    }

    fn secs(c: &Countdown) -> Vec<char> {
        c.digits()[Period::Seconds].clone()
    }

    #[test]
    fn ten_seconds_down() {
        let mut c = countdown(CounterProps::new().seconds(10));
        assert_eq!(secs(&c), vec!['1', '0']);
        for i in 1..=5 {
            assert_eq!(c.tick(i * 1_000), Tick::Advanced);
        }
        assert_eq!(secs(&c), vec!['0', '5']);
        for i in 6..=9 {
            c.tick(i * 1_000);
        }
        assert_eq!(c.tick(10_000), Tick::Finished);
        assert_eq!(secs(&c), vec!['0', '0']);
        assert_eq!(c.tick(11_000), Tick::Idle);
        assert_eq!(secs(&c), vec!['0', '0']);
        assert!(c.finished());
    }

    #[test]
    fn ten_seconds_up() {
        let mut c = countdown(CounterProps::new().seconds(10).direction("up"));
        assert_eq!(secs(&c), vec!['0', '0']);
        for i in 1..=10 {
            c.tick(i * 1_000);
        }
        assert_eq!(secs(&c), vec!['1', '0']);
        c.tick(11_000);
        assert_eq!(secs(&c), vec!['1', '0']);
        assert_eq!(c.elapsed_ms(), 10_000);
    }

    #[test]
    fn overshoot_clamps_to_zero() {
        let mut c = countdown(CounterProps::new().seconds(3).interval(2_000));
        assert_eq!(c.tick(2_000), Tick::Advanced);
        assert_eq!(c.remaining_ms(), 1_000);
        assert_eq!(c.tick(4_000), Tick::Finished);
        assert_eq!(c.remaining_ms(), 0);
    }

    #[test]
    fn zero_duration_starts_finished() {
        let mut c = countdown(CounterProps::new().seconds(0));
        assert!(c.finished());
        assert_eq!(c.tick(1_000), Tick::Idle);
    }

    #[test]
    fn sync_mode_follows_the_clock() {
        let props = CounterProps::new()
            .from_time(0)
            .to(10_000)
            .sync_time(true);
        let mut c = Countdown::new(&props, 500).expect("valid props");
        // Clock jumped 3.5 s between ticks.
        assert_eq!(c.tick(4_000), Tick::Advanced);
        assert_eq!(c.remaining_ms(), 6_500);
        // Clock went backwards: display holds.
        assert_eq!(c.tick(3_000), Tick::Advanced);
        assert_eq!(c.remaining_ms(), 6_500);
        assert_eq!(c.tick(20_000), Tick::Finished);
    }

    #[test]
    fn snapshot_matches_accessors() {
        let c = countdown(CounterProps::new().seconds(3_725));
        let snap = c.snapshot();
        assert_eq!(snap.remaining_ms, 3_725_000);
        assert_eq!(snap.numbers[Period::Hours], 1);
        assert_eq!(snap.numbers[Period::Minutes], 2);
        assert_eq!(snap.numbers[Period::Seconds], 5);
        assert_eq!(snap.digits[Period::Minutes], vec!['0', '2']);
        assert_eq!(c.number(Period::Days), Some(0));
    }
}
