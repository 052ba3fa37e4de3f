#![forbid(unsafe_code)]

//! Renderer-facing view of a countdown.
//!
//! One [`Segment`] per active period carries everything a renderer draws:
//! decorated digits, the label, the separator that follows it and, in
//! animated mode, one [`DigitLane`] per digit.
//!
//! A lane is the strip `0, 1, ..., max, 0` that scrolls behind a digit
//! window. Zero appears at both ends so the strip can keep rolling in one
//! direction: on arriving at one zero the renderer snaps, without a
//! transition, to the other.

use unicode_width::UnicodeWidthStr;

use crate::digits::{digit_char, to_radix};
use crate::label::separator_after;
use crate::period::{Period, PeriodMap};
use crate::settings::{Direction, Settings};

/// One period's worth of display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub period: Period,
    pub number: u64,
    /// Raw digits in the counter's radix.
    pub digits: Vec<char>,
    /// Digits after the digit map and wrapper.
    pub display: Vec<String>,
    pub label: Option<String>,
    /// Drawn after this segment. Never set on the last one.
    pub separator: Option<String>,
    /// Present only in animated mode, one per digit.
    pub lanes: Option<Vec<DigitLane>>,
}

impl Segment {
    /// Decorated digits joined together.
    pub fn text(&self) -> String {
        self.display.concat()
    }
}

/// How a lane moves between two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneMove {
    /// Same digit; nothing to animate.
    Hold,
    /// Animate to `to_slot`.
    Roll { to_slot: usize },
    /// Animate to `to_slot`, then jump to `reset_slot` with zero duration.
    Wrap { to_slot: usize, reset_slot: usize },
}

/// The strip of digits behind one digit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitLane {
    /// Largest digit value on the strip.
    pub max_value: u32,
}

impl DigitLane {
    /// Number of slots, counting both zeros.
    pub fn len(&self) -> usize {
        self.max_value as usize + 2
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn bottom_zero(&self) -> usize {
        self.max_value as usize + 1
    }

    /// Where a zero waits for the next change.
    pub fn reset_slot(&self, direction: Direction) -> usize {
        match direction {
            Direction::Down => self.bottom_zero(),
            Direction::Up => 0,
        }
    }

    /// Where a zero lands when the lane rolls into it.
    fn arrival_zero(&self, direction: Direction) -> usize {
        match direction {
            Direction::Down => 0,
            Direction::Up => self.bottom_zero(),
        }
    }

    fn value_slot(&self, digit: char) -> usize {
        digit.to_digit(36).unwrap_or(0).min(self.max_value) as usize
    }

    /// Resting slot for `digit` before any change.
    pub fn rest_slot(&self, digit: char, direction: Direction) -> usize {
        match self.value_slot(digit) {
            0 => self.reset_slot(direction),
            slot => slot,
        }
    }

    /// Move from showing `from` to showing `to`.
    pub fn transition(&self, from: char, to: char, direction: Direction) -> LaneMove {
        if from == to {
            return LaneMove::Hold;
        }
        match self.value_slot(to) {
            0 => LaneMove::Wrap {
                to_slot: self.arrival_zero(direction),
                reset_slot: self.reset_slot(direction),
            },
            slot => LaneMove::Roll { to_slot: slot },
        }
    }

    /// Vertical offset of `slot`, as a percentage of the strip height.
    pub fn offset_percent(&self, slot: usize) -> f64 {
        -(100.0 / self.len() as f64) * slot as f64
    }
}

/// Lane maxima for a period shown with `digit_count` digits.
///
/// Lanes are full-radix except the leading digit of a bounded, non-top
/// period: minutes in base 10 never show more than `5` there.
pub fn lane_max_values(period: Period, top: Period, digit_count: usize, radix: u32) -> Vec<u32> {
    let full = radix.saturating_sub(1);
    let mut lanes = vec![full; digit_count];
    let Some(natural) = period.natural_max().filter(|_| period != top) else {
        return lanes;
    };
    let natural = to_radix(natural, radix);
    let leading = natural
        .chars()
        .next()
        .and_then(|c| c.to_digit(radix))
        .unwrap_or(full);
    if let Some(index) = digit_count.checked_sub(natural.len()) {
        lanes[index] = leading;
    }
    lanes
}

/// Builds one segment per active period.
pub fn build_segments(
    settings: &Settings,
    numbers: &PeriodMap<u64>,
    digits: &PeriodMap<Vec<char>>,
) -> Vec<Segment> {
    let count = settings.periods.len();
    let top = settings.top();
    settings
        .periods
        .iter()
        .enumerate()
        .map(|(index, &period)| {
            let number = numbers.get(period).copied().unwrap_or(0);
            let digits = digits
                .get(period)
                .cloned()
                .unwrap_or_else(|| vec![digit_char(0)]);
            let lanes = settings.display.is_animated().then(|| {
                lane_max_values(period, top, digits.len(), settings.radix)
                    .into_iter()
                    .map(|max_value| DigitLane { max_value })
                    .collect()
            });
            Segment {
                period,
                number,
                display: settings.decorator.decorate_all(&digits),
                digits,
                label: settings.labels.resolve(period, number),
                separator: separator_after(settings.separator.as_deref(), index, count)
                    .map(str::to_string),
                lanes,
            }
        })
        .collect()
}

/// Joins segments into one line of text.
///
/// Each segment is its digits, then a space and its label when it has one.
/// Segments are joined by their separator, or a single space without one.
pub fn render_line(segments: &[Segment]) -> String {
    let mut line = String::new();
    for (index, segment) in segments.iter().enumerate() {
        line.push_str(&segment.text());
        if let Some(label) = &segment.label {
            line.push(' ');
            line.push_str(label);
        }
        match &segment.separator {
            Some(sep) => line.push_str(sep),
            None if index + 1 < segments.len() => line.push(' '),
            None => {}
        }
    }
    line
}

/// Terminal display width of `text`.
pub fn display_width(text: &str) -> usize {
    text.width()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::Countdown;
    use crate::props::{CounterProps, Labels};

    #[test]
    fn lane_maxima_follow_natural_limits() {
        assert_eq!(lane_max_values(Period::Minutes, Period::Days, 2, 10), vec![5, 9]);
        assert_eq!(lane_max_values(Period::Hours, Period::Days, 2, 10), vec![2, 9]);
        assert_eq!(lane_max_values(Period::Hours, Period::Days, 3, 10), vec![9, 2, 9]);
        assert_eq!(lane_max_values(Period::Days, Period::Days, 3, 10), vec![9, 9, 9]);
        // 59 is "2b" in base 24.
        assert_eq!(lane_max_values(Period::Seconds, Period::Days, 2, 24), vec![2, 23]);
    }

    #[test]
    fn top_period_lanes_are_full() {
        assert_eq!(lane_max_values(Period::Minutes, Period::Minutes, 3, 10), vec![9, 9, 9]);
    }

    #[test]
    fn short_digit_run_keeps_full_lanes() {
        assert_eq!(lane_max_values(Period::Minutes, Period::Days, 1, 10), vec![9]);
    }

    #[test]
    fn lane_moves_counting_down() {
        let lane = DigitLane { max_value: 5 };
        assert_eq!(lane.len(), 7);
        assert_eq!(lane.transition('3', '3', Direction::Down), LaneMove::Hold);
        assert_eq!(
            lane.transition('3', '2', Direction::Down),
            LaneMove::Roll { to_slot: 2 }
        );
        assert_eq!(
            lane.transition('1', '0', Direction::Down),
            LaneMove::Wrap {
                to_slot: 0,
                reset_slot: 6
            }
        );
        assert_eq!(lane.rest_slot('0', Direction::Down), 6);
        assert_eq!(
            lane.transition('0', '5', Direction::Down),
            LaneMove::Roll { to_slot: 5 }
        );
    }

    #[test]
    fn lane_moves_counting_up() {
        let lane = DigitLane { max_value: 9 };
        assert_eq!(
            lane.transition('9', '0', Direction::Up),
            LaneMove::Wrap {
                to_slot: 10,
                reset_slot: 0
            }
        );
        assert_eq!(lane.rest_slot('0', Direction::Up), 0);
        assert_eq!(lane.offset_percent(0), 0.0);
        assert!((lane.offset_percent(10) + 1000.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn segments_carry_labels_and_separators() {
        let props = CounterProps::new()
            .seconds(3_725)
            .min_period("seconds")
            .max_period("hours")
            .separator(":")
            .labels(Labels::map([("hours", "h"), ("minutes", "m")]));
        let countdown = Countdown::new(&props, 0).expect("valid props");
        let segments = countdown.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text(), "1");
        assert_eq!(segments[0].label.as_deref(), Some("h"));
        assert_eq!(segments[1].separator.as_deref(), Some(":"));
        assert_eq!(segments[2].label, None);
        assert_eq!(segments[2].separator, None);
        assert!(segments.iter().all(|s| s.lanes.is_none()));
        assert_eq!(render_line(&segments), "1 h:02 m:05");
    }

    #[test]
    fn animated_mode_builds_lanes() {
        let props = CounterProps::new().seconds(90).easing("ease-in", 200);
        let countdown = Countdown::new(&props, 0).expect("valid props");
        let segments = countdown.segments();
        let seconds = segments
            .iter()
            .find(|s| s.period == Period::Seconds)
            .expect("seconds segment");
        let lanes = seconds.lanes.as_ref().expect("animated lanes");
        assert_eq!(lanes, &vec![DigitLane { max_value: 5 }, DigitLane { max_value: 9 }]);
    }

    #[test]
    fn width_counts_wide_glyphs() {
        assert_eq!(display_width("12 days"), 7);
        assert_eq!(display_width("１２"), 4);
    }
}
