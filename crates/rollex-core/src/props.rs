#![forbid(unsafe_code)]

//! Counter configuration as a host supplies it.
//!
//! [`CounterProps`] is deliberately loose: strings for period names and
//! direction, signed integers for counts. [`crate::validate`] checks it and
//! [`crate::Settings`] turns it into canonical form.
//!
//! # Example
//!
//! ```rust
//! use rollex_core::props::{CounterProps, DigitCount};
//!
//! let props = CounterProps::new()
//!     .seconds(90)
//!     .max_period("minutes")
//!     .digits(DigitCount::Uniform(2));
//! assert_eq!(props.interval, 1000);
//! assert_eq!(props.direction, "down");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::digits::DigitWrapper;
use crate::period::Period;

/// Default tick interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
/// Default animated transition length in milliseconds.
pub const DEFAULT_EASING_DURATION_MS: u64 = 300;

/// A digit count: one number for every period, or one per period name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum DigitCount {
    Uniform(i64),
    PerPeriod(BTreeMap<String, i64>),
}

impl DigitCount {
    /// Count for `period`. Uniform counts apply everywhere; per-period maps
    /// return `None` for periods they do not mention.
    pub fn get(&self, period: Period) -> Option<i64> {
        match self {
            Self::Uniform(n) => Some(*n),
            Self::PerPeriod(map) => map.get(period.name()).copied(),
        }
    }

    /// Every value present, for sign checks.
    pub fn values(&self) -> Vec<i64> {
        match self {
            Self::Uniform(n) => vec![*n],
            Self::PerPeriod(map) => map.values().copied().collect(),
        }
    }

    pub fn per_period<K: Into<String>>(entries: impl IntoIterator<Item = (K, i64)>) -> Self {
        Self::PerPeriod(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<i64> for DigitCount {
    fn from(n: i64) -> Self {
        Self::Uniform(n)
    }
}

/// Label callback: `(period, number) -> label`.
#[derive(Clone)]
pub struct LabelFn(Arc<dyn Fn(Period, u64) -> String + Send + Sync>);

impl LabelFn {
    pub fn new(f: impl Fn(Period, u64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, period: Period, number: u64) -> String {
        (self.0)(period, number)
    }
}

impl fmt::Debug for LabelFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LabelFn(..)")
    }
}

/// How period labels are produced.
#[derive(Debug, Clone, Default)]
pub enum Labels {
    /// The period's own name (`"days"`, `"hours"`, ...).
    #[default]
    PeriodName,
    /// Fixed text per period name. Missing entries yield no label.
    Map(BTreeMap<String, String>),
    /// Computed from the period and its current number.
    Func(LabelFn),
}

impl Labels {
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn func(f: impl Fn(Period, u64) -> String + Send + Sync + 'static) -> Self {
        Self::Func(LabelFn::new(f))
    }
}

/// Counter configuration.
///
/// Timestamps are Unix milliseconds; `seconds` is a plain duration.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct CounterProps {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub seconds: Option<i64>,
    pub interval: u64,
    pub direction: String,
    pub digits: Option<DigitCount>,
    pub min_digits: Option<DigitCount>,
    pub max_digits: Option<DigitCount>,
    pub min_period: String,
    pub max_period: String,
    pub sync_time: bool,
    pub radix: u32,
    pub digit_map: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub digit_wrapper: DigitWrapper,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "label_map::deserialize"))]
    pub labels: Labels,
    pub separator: Option<String>,
    pub frozen: bool,
    pub easing_function: Option<String>,
    pub easing_duration: u64,
}

impl Default for CounterProps {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            seconds: None,
            interval: DEFAULT_INTERVAL_MS,
            direction: "down".to_string(),
            digits: None,
            min_digits: None,
            max_digits: None,
            min_period: Period::Seconds.name().to_string(),
            max_period: Period::Days.name().to_string(),
            sync_time: false,
            radix: 10,
            digit_map: BTreeMap::new(),
            digit_wrapper: DigitWrapper::identity(),
            labels: Labels::PeriodName,
            separator: None,
            frozen: false,
            easing_function: None,
            easing_duration: DEFAULT_EASING_DURATION_MS,
        }
    }
}

impl CounterProps {
    /// Props with every default applied and no time source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts this many seconds.
    pub fn seconds(mut self, seconds: i64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    /// Counts towards this timestamp.
    pub fn to(mut self, ts_ms: i64) -> Self {
        self.to = Some(ts_ms);
        self
    }

    /// Counts from this timestamp instead of the creation instant.
    pub fn from_time(mut self, ts_ms: i64) -> Self {
        self.from = Some(ts_ms);
        self
    }

    pub fn interval(mut self, interval_ms: u64) -> Self {
        self.interval = interval_ms;
        self
    }

    /// `"up"` or `"down"`.
    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    pub fn digits(mut self, digits: impl Into<DigitCount>) -> Self {
        self.digits = Some(digits.into());
        self
    }

    pub fn min_digits(mut self, digits: impl Into<DigitCount>) -> Self {
        self.min_digits = Some(digits.into());
        self
    }

    pub fn max_digits(mut self, digits: impl Into<DigitCount>) -> Self {
        self.max_digits = Some(digits.into());
        self
    }

    pub fn min_period(mut self, period: impl Into<String>) -> Self {
        self.min_period = period.into();
        self
    }

    pub fn max_period(mut self, period: impl Into<String>) -> Self {
        self.max_period = period.into();
        self
    }

    /// Recompute remaining time from the clock on every tick.
    pub fn sync_time(mut self, sync: bool) -> Self {
        self.sync_time = sync;
        self
    }

    pub fn radix(mut self, radix: u32) -> Self {
        self.radix = radix;
        self
    }

    /// Adds one digit replacement.
    pub fn map_digit(mut self, digit: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.digit_map.insert(digit.into(), replacement.into());
        self
    }

    pub fn digit_wrapper(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.digit_wrapper = DigitWrapper::new(f);
        self
    }

    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Do not start when mounted.
    pub fn frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// Selects the animated display with the given easing.
    pub fn easing(mut self, function: impl Into<String>, duration_ms: u64) -> Self {
        self.easing_function = Some(function.into());
        self.easing_duration = duration_ms;
        self
    }
}

#[cfg(feature = "serde")]
mod label_map {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};

    use super::Labels;

    /// `labels` arrives as an optional name→text object.
    pub(super) fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Labels, D::Error> {
        Ok(Option::<BTreeMap<String, String>>::deserialize(de)?
            .map_or(Labels::PeriodName, Labels::Map))
    }
}
