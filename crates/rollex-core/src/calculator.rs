#![forbid(unsafe_code)]

//! Remaining time → per-period numbers → digit sequences.
//!
//! Everything here is total: once settings are built, no input makes these
//! functions fail.

use crate::digits::{DigitBounds, digit_count, format_digits};
use crate::period::{Period, PeriodMap};
use crate::settings::Direction;

/// Timestamp the breakdown is taken from.
///
/// Counting down shows what is left; counting up shows what has passed.
#[inline]
pub fn display_ts(direction: Direction, initial_ms: u64, remaining_ms: u64) -> u64 {
    match direction {
        Direction::Down => remaining_ms,
        Direction::Up => initial_ms.saturating_sub(remaining_ms),
    }
}

/// Number for each active period at `ts_ms`.
///
/// `periods` must be a canonical slice; its first entry is the top period.
pub fn period_numbers(periods: &[Period], ts_ms: u64) -> PeriodMap<u64> {
    let Some(&top) = periods.first() else {
        return PeriodMap::new();
    };
    periods
        .iter()
        .map(|&p| (p, p.number_at(top, ts_ms)))
        .collect()
}

/// Largest number `period` can show over the counter's lifetime.
///
/// The top period is bounded by the initial duration; the others by their
/// calendar maximum.
pub fn max_number(period: Period, top: Period, initial_ms: u64) -> u64 {
    match period.natural_max() {
        Some(max) if period != top => max,
        _ => initial_ms / period.duration_ms(),
    }
}

/// Digit count that fits `period`'s largest number in `radix`.
pub fn auto_digits(period: Period, top: Period, initial_ms: u64, radix: u32) -> usize {
    digit_count(max_number(period, top, initial_ms), radix)
}

/// Formats every number in `numbers` under its period's bounds.
pub fn period_digits(
    numbers: &PeriodMap<u64>,
    bounds: &PeriodMap<DigitBounds>,
    radix: u32,
) -> PeriodMap<Vec<char>> {
    numbers
        .iter()
        .map(|(p, &n)| {
            let b = bounds.get(p).copied().unwrap_or(DigitBounds { min: 1, max: None });
            (p, format_digits(n, b, radix))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: u64 = 86_400_000;
    const H: u64 = 3_600_000;
    const M: u64 = 60_000;
    const S: u64 = 1_000;

    #[test]
    fn breakdown_over_all_periods() {
        let ts = 200 * D + 6 * H + 35 * M + 54 * S;
        let numbers = period_numbers(&Period::ALL, ts);
        assert_eq!(numbers[Period::Days], 200);
        assert_eq!(numbers[Period::Hours], 6);
        assert_eq!(numbers[Period::Minutes], 35);
        assert_eq!(numbers[Period::Seconds], 54);
    }

    #[test]
    fn sliced_top_absorbs() {
        let periods = Period::span(Period::Minutes, Period::Seconds);
        let numbers = period_numbers(periods, 7_200 * S);
        assert_eq!(numbers[Period::Minutes], 120);
        assert_eq!(numbers[Period::Seconds], 0);
        assert!(!numbers.contains(Period::Hours));
    }

    #[test]
    fn up_counts_elapsed() {
        assert_eq!(display_ts(Direction::Up, 10_000, 7_000), 3_000);
        assert_eq!(display_ts(Direction::Down, 10_000, 7_000), 7_000);
        assert_eq!(display_ts(Direction::Up, 10_000, 12_000), 0);
    }

    #[test]
    fn auto_digits_use_closed_form_maxima() {
        let initial = 200 * D + 6 * H;
        assert_eq!(auto_digits(Period::Days, Period::Days, initial, 10), 3);
        assert_eq!(auto_digits(Period::Hours, Period::Days, initial, 10), 2);
        assert_eq!(auto_digits(Period::Hours, Period::Days, initial, 24), 1);
        assert_eq!(auto_digits(Period::Minutes, Period::Days, initial, 24), 2);
        // Top period other than days still sizes from the duration.
        assert_eq!(auto_digits(Period::Minutes, Period::Minutes, 7_200 * S, 10), 3);
        assert_eq!(auto_digits(Period::Seconds, Period::Seconds, 100 * S, 10), 3);
    }

    #[test]
    fn zero_duration_needs_one_digit() {
        assert_eq!(auto_digits(Period::Days, Period::Days, 0, 10), 1);
    }

    #[test]
    fn digits_follow_bounds() {
        let numbers = period_numbers(Period::span(Period::Hours, Period::Minutes), 6 * H + 5 * M);
        let bounds: PeriodMap<DigitBounds> = [
            (Period::Hours, DigitBounds::exact(3)),
            (Period::Minutes, DigitBounds::exact(1)),
        ]
        .into_iter()
        .collect();
        let digits = period_digits(&numbers, &bounds, 10);
        assert_eq!(digits[Period::Hours], vec!['0', '0', '6']);
        assert_eq!(digits[Period::Minutes], vec!['5']);
    }
}
