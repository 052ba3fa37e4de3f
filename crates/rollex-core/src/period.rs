#![forbid(unsafe_code)]

//! Periods a countdown is broken into, and a small map keyed by them.
//!
//! The canonical order is largest first: days, hours, minutes, seconds.
//! A counter works on a contiguous slice of that order, from its
//! `max_period` down to its `min_period`.

use std::fmt;
use std::str::FromStr;

static CANONICAL: [Period; 4] = Period::ALL;

/// One unit of a countdown breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Period {
    /// All periods in canonical (largest first) order.
    pub const ALL: [Period; 4] = [Period::Days, Period::Hours, Period::Minutes, Period::Seconds];

    /// Lower-case name, as used in props and default labels.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }

    /// Position in [`Period::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Length of one unit in milliseconds.
    pub const fn duration_ms(self) -> u64 {
        match self {
            Self::Days => 86_400_000,
            Self::Hours => 3_600_000,
            Self::Minutes => 60_000,
            Self::Seconds => 1_000,
        }
    }

    /// Largest value the period takes when a bigger period absorbs overflow.
    ///
    /// Days have no natural bound.
    pub const fn natural_max(self) -> Option<u64> {
        match self {
            Self::Days => None,
            Self::Hours => Some(23),
            Self::Minutes | Self::Seconds => Some(59),
        }
    }

    /// Active periods between `max` and `min`, inclusive, in canonical order.
    ///
    /// Returns an empty slice when `min` is larger than `max`; validation
    /// rejects that ordering before a counter is built.
    pub fn span(max: Period, min: Period) -> &'static [Period] {
        if min < max {
            return &[];
        }
        &CANONICAL[max.index()..=min.index()]
    }

    /// Number shown for this period at `ts_ms`, when `top` is the largest
    /// active period.
    ///
    /// The top period absorbs everything above it; the rest are the UTC
    /// calendar decomposition (hour of day, minute of hour, second of minute).
    pub fn number_at(self, top: Period, ts_ms: u64) -> u64 {
        let whole = ts_ms / self.duration_ms();
        if self == top {
            return whole;
        }
        match self.natural_max() {
            Some(max) => whole % (max + 1),
            None => whole,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriod(pub String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown period {:?}: expected one of days, hours, minutes, seconds",
            self.0
        )
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownPeriod(s.to_string()))
    }
}

/// A fixed-size map from [`Period`] to `T`.
///
/// Iteration always follows canonical period order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodMap<T> {
    slots: [Option<T>; 4],
}

impl<T> Default for PeriodMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PeriodMap<T> {
    /// Creates an empty map.
    pub const fn new() -> Self {
        Self {
            slots: [None, None, None, None],
        }
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, period: Period, value: T) -> Option<T> {
        self.slots[period.index()].replace(value)
    }

    pub fn get(&self, period: Period) -> Option<&T> {
        self.slots[period.index()].as_ref()
    }

    pub fn contains(&self, period: Period) -> bool {
        self.slots[period.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over present entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Period, &T)> {
        Period::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(p, slot)| slot.as_ref().map(|v| (p, v)))
    }
}

impl<T> FromIterator<(Period, T)> for PeriodMap<T> {
    fn from_iter<I: IntoIterator<Item = (Period, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (period, value) in iter {
            map.insert(period, value);
        }
        map
    }
}

impl<T> std::ops::Index<Period> for PeriodMap<T> {
    type Output = T;

    /// Panics when the period is absent, like `HashMap` indexing.
    fn index(&self, period: Period) -> &T {
        match self.get(period) {
            Some(value) => value,
            None => panic!("no entry for period {period}"),
        }
    }
}
