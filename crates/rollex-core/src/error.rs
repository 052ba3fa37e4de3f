#![forbid(unsafe_code)]

//! Construction-time errors.
//!
//! A counter either builds from valid props or fails with exactly one
//! [`ConfigError`]. Nothing fails after construction.

use std::fmt;

/// Which period prop a [`ConfigError::UnknownPeriod`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodField {
    MinPeriod,
    MaxPeriod,
}

impl PeriodField {
    pub const fn prop_name(self) -> &'static str {
        match self {
            Self::MinPeriod => "minPeriod",
            Self::MaxPeriod => "maxPeriod",
        }
    }
}

/// A violated configuration invariant.
///
/// `Display` output is stable and names the offending prop the way a
/// widget user writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `seconds` combined with `to` or `from`.
    BothTimeSources,
    /// Neither `seconds` nor `to` given.
    MissingTimeSource,
    /// `to` is earlier than `from`.
    TargetBeforeOrigin { from: i64, to: i64 },
    /// `seconds` is negative.
    NegativeSeconds(i64),
    /// A unified `digits` count is negative.
    NegativeDigits(i64),
    /// A legacy `minDigits` count is zero or negative.
    NonPositiveMinDigits(i64),
    /// A legacy `maxDigits` count is negative.
    NegativeMaxDigits(i64),
    /// `digits` combined with `minDigits`/`maxDigits`.
    MixedDigitStyles,
    /// A period prop names no known period.
    UnknownPeriod { field: PeriodField, value: String },
    /// `minPeriod` is a larger unit than `maxPeriod`.
    PeriodOrder { min: String, max: String },
    /// `syncTime` without `to`.
    SyncWithoutTarget,
    /// `radix` outside 2..=36.
    RadixOutOfRange(u32),
    /// A `digitMap` key that is not a single character.
    InvalidDigitMapKey(String),
    /// `direction` is neither `up` nor `down`.
    InvalidDirection(String),
    /// `interval` is zero.
    ZeroInterval,
    /// Legacy min/max digits that contradict each other after normalisation.
    DigitConflict { min: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BothTimeSources => f.write_str(r#"cannot use "to" and "from" with "seconds""#),
            Self::MissingTimeSource => f.write_str(r#"provide either "seconds" or "to""#),
            Self::TargetBeforeOrigin { .. } => f.write_str(r#""to" must be bigger than "from""#),
            Self::NegativeSeconds(_) => {
                f.write_str(r#""seconds" must be greater than or equal to zero"#)
            }
            Self::NegativeDigits(_) => f.write_str(r#""digits" must not be negative"#),
            Self::NonPositiveMinDigits(_) => f.write_str(r#""minDigits" must be positive"#),
            Self::NegativeMaxDigits(_) => f.write_str(r#""maxDigits" must not be negative"#),
            Self::MixedDigitStyles => {
                f.write_str(r#"cannot use "digits" with "minDigits" or "maxDigits""#)
            }
            Self::UnknownPeriod { field, .. } => write!(
                f,
                r#""{}" must be one of: days, hours, minutes, seconds"#,
                field.prop_name()
            ),
            Self::PeriodOrder { .. } => {
                f.write_str(r#""minPeriod" must not be larger than "maxPeriod""#)
            }
            Self::SyncWithoutTarget => f.write_str(r#""syncTime" must be used with "to""#),
            Self::RadixOutOfRange(_) => f.write_str(r#""radix" must be between 2 and 36"#),
            Self::InvalidDigitMapKey(_) => f.write_str(r#""digitMap" keys must be single digits"#),
            Self::InvalidDirection(_) => f.write_str(r#""direction" must be either up or down"#),
            Self::ZeroInterval => f.write_str(r#""interval" must be positive"#),
            Self::DigitConflict { min, max } => {
                write!(f, "conflict: minDigits ({min}) > maxDigits ({max})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
