#![forbid(unsafe_code)]

//! Canonical counter settings.
//!
//! [`Settings::from_props`] validates once and resolves every loosely typed
//! prop: period names become a period slice, the two digit-count styles
//! become one [`DigitBounds`] per period, the digit map becomes a
//! [`DigitDecorator`]. Nothing downstream looks at [`CounterProps`] again.

use std::collections::HashMap;
use std::str::FromStr;

use crate::calculator::auto_digits;
use crate::digits::{DigitBounds, DigitDecorator};
use crate::error::{ConfigError, PeriodField};
use crate::period::{Period, PeriodMap};
use crate::props::{CounterProps, DigitCount, Labels};
use crate::validate::{parse_period, validate};

/// Counting direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(ConfigError::InvalidDirection(other.to_string())),
        }
    }
}

/// How digits change on screen. Chosen once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    /// Digits are replaced in place.
    Static,
    /// Digits roll along lanes.
    Animated { easing: String, duration_ms: u64 },
}

impl DisplayMode {
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated { .. })
    }

    /// Style classes for hosts that style by class name.
    pub fn class_names(&self, frozen: bool) -> String {
        let mut classes = String::from("rollex ");
        classes.push_str(match self {
            Self::Static => "rollex-static",
            Self::Animated { .. } => "rollex-animated",
        });
        if frozen {
            classes.push_str(" rollex-frozen");
        }
        classes
    }
}

/// Where the initial duration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// A plain number of seconds.
    Duration { seconds: u64 },
    /// A timestamp range in Unix milliseconds.
    Range { from_ms: i64, to_ms: i64 },
}

/// Validated, normalised counter configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: TimeSource,
    /// Milliseconds between start and the terminal bound.
    pub initial_ms: u64,
    /// Clock reading when the counter was built.
    pub created_at_ms: i64,
    pub direction: Direction,
    pub interval_ms: u64,
    pub sync_time: bool,
    /// Active periods, largest first.
    pub periods: &'static [Period],
    pub bounds: PeriodMap<DigitBounds>,
    pub radix: u32,
    pub decorator: DigitDecorator,
    pub labels: Labels,
    pub separator: Option<String>,
    pub display: DisplayMode,
    pub frozen: bool,
}

impl Settings {
    /// Validates `props` and resolves them against the clock reading `now_ms`.
    pub fn from_props(props: &CounterProps, now_ms: i64) -> Result<Self, ConfigError> {
        validate(props)?;

        let source = match (props.seconds, props.to) {
            (Some(seconds), _) => TimeSource::Duration {
                seconds: u64::try_from(seconds).unwrap_or_default(),
            },
            (None, Some(to_ms)) => TimeSource::Range {
                from_ms: props.from.unwrap_or(now_ms),
                to_ms,
            },
            (None, None) => return Err(ConfigError::MissingTimeSource),
        };
        let initial_ms = match source {
            TimeSource::Duration { seconds } => seconds.saturating_mul(1000),
            TimeSource::Range { from_ms, to_ms } => {
                u64::try_from(to_ms.saturating_sub(from_ms)).unwrap_or_default()
            }
        };

        let min_period = parse_period(&props.min_period, PeriodField::MinPeriod)?;
        let max_period = parse_period(&props.max_period, PeriodField::MaxPeriod)?;
        let periods = Period::span(max_period, min_period);

        let radix = props.radix;
        let bounds = match (&props.min_digits, &props.max_digits) {
            (None, None) => unified_bounds(props.digits.as_ref(), periods, initial_ms, radix),
            (min, max) => legacy_bounds(min.as_ref(), max.as_ref(), periods, initial_ms, radix)?,
        };

        let digit_map: HashMap<char, String> = props
            .digit_map
            .iter()
            .filter_map(|(k, v)| Some((k.chars().next()?, v.clone())))
            .collect();

        let display = match &props.easing_function {
            Some(easing) => DisplayMode::Animated {
                easing: easing.clone(),
                duration_ms: props.easing_duration,
            },
            None => DisplayMode::Static,
        };

        let settings = Self {
            source,
            initial_ms,
            created_at_ms: now_ms,
            direction: props.direction.parse()?,
            interval_ms: props.interval,
            sync_time: props.sync_time,
            periods,
            bounds,
            radix: props.radix,
            decorator: DigitDecorator::new(digit_map, props.digit_wrapper.clone()),
            labels: props.labels.clone(),
            separator: props.separator.clone(),
            display,
            frozen: props.frozen,
        };
        crate::debug!(
            initial_ms = settings.initial_ms,
            periods = settings.periods.len(),
            radix = settings.radix,
            "counter settings resolved"
        );
        Ok(settings)
    }

    /// Largest active period.
    pub fn top(&self) -> Period {
        self.periods.first().copied().unwrap_or(Period::Seconds)
    }
}

fn to_count(n: i64) -> usize {
    usize::try_from(n).unwrap_or_default()
}

/// `digits`: positive values are exact; zero or absent means auto.
fn unified_bounds(
    digits: Option<&DigitCount>,
    periods: &[Period],
    initial_ms: u64,
    radix: u32,
) -> PeriodMap<DigitBounds> {
    let top = periods.first().copied().unwrap_or(Period::Seconds);
    periods
        .iter()
        .map(|&p| {
            let n = match digits.and_then(|d| d.get(p)) {
                Some(d) if d > 0 => to_count(d),
                _ => auto_digits(p, top, initial_ms, radix),
            };
            (p, DigitBounds::exact(n))
        })
        .collect()
}

/// `minDigits` / `maxDigits`, reconciled per period.
fn legacy_bounds(
    min_digits: Option<&DigitCount>,
    max_digits: Option<&DigitCount>,
    periods: &[Period],
    initial_ms: u64,
    radix: u32,
) -> Result<PeriodMap<DigitBounds>, ConfigError> {
    let top = periods.first().copied().unwrap_or(Period::Seconds);
    let mut bounds = PeriodMap::new();
    for &p in periods {
        let auto = auto_digits(p, top, initial_ms, radix);
        let given_min = min_digits.and_then(|d| d.get(p)).map(to_count);
        let given_max = max_digits.and_then(|d| d.get(p)).map(to_count);

        let mut min = given_min.unwrap_or(auto);
        let mut max = given_max.unwrap_or(auto);
        if given_max.is_none() && given_min.is_some() && min > max {
            max = min;
        }
        let max = if given_max == Some(0) {
            None
        } else if min > max {
            if given_min.is_some() {
                return Err(ConfigError::DigitConflict { min, max });
            }
            min = max;
            Some(max)
        } else {
            Some(max)
        };
        bounds.insert(p, DigitBounds { min, max });
    }
    Ok(bounds)
}
