#![forbid(unsafe_code)]

//! Period labels and separators.

use crate::period::Period;
use crate::props::Labels;

impl Labels {
    /// Label for `period` showing `number`.
    ///
    /// A map without an entry for the period yields `None`; that is passed
    /// through to the renderer as-is.
    pub fn resolve(&self, period: Period, number: u64) -> Option<String> {
        match self {
            Self::PeriodName => Some(period.name().to_string()),
            Self::Map(map) => map.get(period.name()).cloned(),
            Self::Func(f) => Some(f.call(period, number)),
        }
    }
}

/// Separator after the segment at `index` of `count`. The last segment has
/// none.
pub fn separator_after(separator: Option<&str>, index: usize, count: usize) -> Option<&str> {
    separator.filter(|_| index + 1 < count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_period_name() {
        assert_eq!(
            Labels::PeriodName.resolve(Period::Hours, 3).as_deref(),
            Some("hours")
        );
    }

    #[test]
    fn map_misses_are_none() {
        let labels = Labels::map([("days", "d"), ("hours", "h")]);
        assert_eq!(labels.resolve(Period::Days, 1).as_deref(), Some("d"));
        assert_eq!(labels.resolve(Period::Seconds, 1), None);
    }

    #[test]
    fn func_sees_number() {
        let labels = Labels::func(|p, n| {
            let name = p.name();
            if n == 1 {
                name.trim_end_matches('s').to_string()
            } else {
                name.to_string()
            }
        });
        assert_eq!(labels.resolve(Period::Days, 1).as_deref(), Some("day"));
        assert_eq!(labels.resolve(Period::Days, 2).as_deref(), Some("days"));
    }

    #[test]
    fn separator_skips_last() {
        assert_eq!(separator_after(Some(":"), 0, 3), Some(":"));
        assert_eq!(separator_after(Some(":"), 2, 3), None);
        assert_eq!(separator_after(None, 0, 3), None);
    }
}
