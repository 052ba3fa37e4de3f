#![forbid(unsafe_code)]

//! Fail-fast prop validation.
//!
//! Rules run in a fixed order and the first violation is returned, so a
//! given set of props always reports the same error.

use crate::digits::{MAX_RADIX, MIN_RADIX};
use crate::error::{ConfigError, PeriodField};
use crate::period::Period;
use crate::props::CounterProps;

/// Checks every configuration invariant of `props`.
pub fn validate(props: &CounterProps) -> Result<(), ConfigError> {
    check_time_source(props)?;
    check_digits(props)?;
    check_periods(props)?;
    if props.sync_time && props.to.is_none() {
        return Err(ConfigError::SyncWithoutTarget);
    }
    if !(MIN_RADIX..=MAX_RADIX).contains(&props.radix) {
        return Err(ConfigError::RadixOutOfRange(props.radix));
    }
    if let Some(key) = props.digit_map.keys().find(|k| k.chars().count() != 1) {
        return Err(ConfigError::InvalidDigitMapKey(key.clone()));
    }
    if !matches!(props.direction.as_str(), "up" | "down") {
        return Err(ConfigError::InvalidDirection(props.direction.clone()));
    }
    if props.interval == 0 {
        return Err(ConfigError::ZeroInterval);
    }
    Ok(())
}

fn check_time_source(props: &CounterProps) -> Result<(), ConfigError> {
    match (props.seconds, props.to) {
        (Some(_), _) if props.to.is_some() || props.from.is_some() => {
            Err(ConfigError::BothTimeSources)
        }
        (None, None) => Err(ConfigError::MissingTimeSource),
        (Some(seconds), None) if seconds < 0 => Err(ConfigError::NegativeSeconds(seconds)),
        (None, Some(to)) => match props.from {
            Some(from) if to < from => Err(ConfigError::TargetBeforeOrigin { from, to }),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

fn check_digits(props: &CounterProps) -> Result<(), ConfigError> {
    if let Some(n) = props.digits.iter().flat_map(|d| d.values()).find(|&n| n < 0) {
        return Err(ConfigError::NegativeDigits(n));
    }
    if let Some(n) = props.min_digits.iter().flat_map(|d| d.values()).find(|&n| n < 1) {
        return Err(ConfigError::NonPositiveMinDigits(n));
    }
    if let Some(n) = props.max_digits.iter().flat_map(|d| d.values()).find(|&n| n < 0) {
        return Err(ConfigError::NegativeMaxDigits(n));
    }
    if props.digits.is_some() && (props.min_digits.is_some() || props.max_digits.is_some()) {
        return Err(ConfigError::MixedDigitStyles);
    }
    Ok(())
}

fn check_periods(props: &CounterProps) -> Result<(), ConfigError> {
    let min = parse_period(&props.min_period, PeriodField::MinPeriod)?;
    let max = parse_period(&props.max_period, PeriodField::MaxPeriod)?;
    // Canonical order puts larger units first.
    if min < max {
        return Err(ConfigError::PeriodOrder {
            min: props.min_period.clone(),
            max: props.max_period.clone(),
        });
    }
    Ok(())
}

pub(crate) fn parse_period(value: &str, field: PeriodField) -> Result<Period, ConfigError> {
    value.parse().map_err(|_| ConfigError::UnknownPeriod {
        field,
        value: value.to_string(),
    })
}
