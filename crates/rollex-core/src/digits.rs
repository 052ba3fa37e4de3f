#![forbid(unsafe_code)]

//! Radix rendering, digit bounds, and digit decoration.
//!
//! A period's number becomes a fixed sequence of digit characters:
//! rendered in the counter's radix, left-padded to the minimum count, or
//! saturated to all-`(radix - 1)` when it does not fit the maximum.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const DIGIT_CHARS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Smallest supported radix.
pub const MIN_RADIX: u32 = 2;
/// Largest supported radix.
pub const MAX_RADIX: u32 = 36;

/// Character for a single digit value. Values past `z` clamp to `z`.
#[inline]
pub fn digit_char(value: u32) -> char {
    DIGIT_CHARS[(value as usize).min(DIGIT_CHARS.len() - 1)] as char
}

/// Renders `n` in `radix`, lower case, without padding.
///
/// Matches the output of JavaScript's `Number.prototype.toString(radix)`
/// for non-negative integers.
pub fn to_radix(mut n: u64, radix: u32) -> String {
    debug_assert!((MIN_RADIX..=MAX_RADIX).contains(&radix));
    if n == 0 {
        return "0".to_string();
    }
    let radix = u64::from(radix);
    let mut out = Vec::new();
    while n > 0 {
        out.push(digit_char((n % radix) as u32));
        n /= radix;
    }
    out.iter().rev().collect()
}

/// Number of digits `n` needs in `radix`. Zero needs one.
pub fn digit_count(mut n: u64, radix: u32) -> usize {
    let radix = u64::from(radix.max(MIN_RADIX));
    let mut count = 1;
    while n >= radix {
        n /= radix;
        count += 1;
    }
    count
}

/// Parses a digit sequence back into a number.
///
/// Returns `None` for characters outside `radix` or on overflow.
pub fn parse_digits(digits: &[char], radix: u32) -> Option<u64> {
    digits.iter().try_fold(0u64, |acc, c| {
        let d = c.to_digit(radix)?;
        acc.checked_mul(u64::from(radix))?.checked_add(u64::from(d))
    })
}

/// Canonical digit count for one period.
///
/// `min` is the padded width; `max`, when present, is the capacity beyond
/// which the display saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitBounds {
    pub min: usize,
    pub max: Option<usize>,
}

impl DigitBounds {
    /// Exactly `n` digits: padded to `n`, saturated past `n`.
    pub const fn exact(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// Whether `number` overflows the maximum digit count in `radix`.
    pub fn saturates(&self, number: u64, radix: u32) -> bool {
        let Some(max) = self.max else {
            return false;
        };
        u32::try_from(max)
            .ok()
            .and_then(|exp| u64::from(radix).checked_pow(exp))
            .is_some_and(|capacity| number >= capacity)
    }
}

/// Formats `number` as digit characters under `bounds`.
pub fn format_digits(number: u64, bounds: DigitBounds, radix: u32) -> Vec<char> {
    if bounds.saturates(number, radix) {
        let top = digit_char(radix.saturating_sub(1));
        return vec![top; bounds.max.unwrap_or(0)];
    }
    let rendered = to_radix(number, radix);
    let pad = bounds.min.saturating_sub(rendered.len());
    std::iter::repeat_n('0', pad).chain(rendered.chars()).collect()
}

/// Wraps a (possibly replaced) digit into its display value.
#[derive(Clone)]
pub struct DigitWrapper(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl DigitWrapper {
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Returns the digit unchanged.
    pub fn identity() -> Self {
        Self::new(str::to_string)
    }

    #[inline]
    pub fn wrap(&self, digit: &str) -> String {
        (self.0)(digit)
    }
}

impl Default for DigitWrapper {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for DigitWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DigitWrapper(..)")
    }
}

/// Digit map plus wrapper: turns a raw digit into its display value.
#[derive(Debug, Clone, Default)]
pub struct DigitDecorator {
    map: HashMap<char, String>,
    wrapper: DigitWrapper,
}

impl DigitDecorator {
    pub fn new(map: HashMap<char, String>, wrapper: DigitWrapper) -> Self {
        Self { map, wrapper }
    }

    /// Replacement for `digit`, if the map has one.
    pub fn mapped(&self, digit: char) -> Option<&str> {
        self.map.get(&digit).map(String::as_str)
    }

    /// Maps then wraps a single digit. Unmapped digits pass through raw.
    pub fn decorate(&self, digit: char) -> String {
        match self.mapped(digit) {
            Some(replacement) => self.wrapper.wrap(replacement),
            None => {
                let mut buf = [0u8; 4];
                self.wrapper.wrap(digit.encode_utf8(&mut buf))
            }
        }
    }

    pub fn decorate_all(&self, digits: &[char]) -> Vec<String> {
        digits.iter().map(|&d| self.decorate(d)).collect()
    }
}
