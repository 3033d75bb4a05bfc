//! Time-field grammars: strict validators, unit arithmetic, prefix slicing.
//!
//! All validation is calendar-aware (leap years, days-per-month) via the
//! `chrono` naive types; partial prefixes such as `2024-07` go through
//! [`chrono::format::Parsed`] so the same range checks apply without a full
//! date being constructible.

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// One time resolution, coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// Coarse-to-fine order, matching the cascade direction.
    pub const ALL: [Unit; 6] = [
        Unit::Year,
        Unit::Month,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column-spec modifier letter (`y m d H M S`).
    #[must_use]
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'y' => Some(Unit::Year),
            'm' => Some(Unit::Month),
            'd' => Some(Unit::Day),
            'H' => Some(Unit::Hour),
            'M' => Some(Unit::Minute),
            'S' => Some(Unit::Second),
            _ => None,
        }
    }

    /// Chars of `yyyy-mm-ddTHH:MM:SS` that identify a period of this unit.
    #[must_use]
    pub fn prefix_len(self) -> usize {
        [4, 7, 10, 13, 16, 19][self.index()]
    }

    /// 9-char x-axis caption for tick labelling.
    #[must_use]
    pub fn caption(self) -> &'static str {
        [
            "years >  ",
            "months > ",
            "days >   ",
            "hours >  ",
            "minutes >",
            "seconds >",
        ][self.index()]
    }

    /// 9-char x-axis caption for summation mode.
    #[must_use]
    pub fn sum_caption(self) -> &'static str {
        [
            "year Σ   ",
            "month Σ  ",
            "day Σ    ",
            "hour Σ   ",
            "min Σ    ",
            "sec Σ    ",
        ][self.index()]
    }
}

/// Char span of one unit inside a validated prefix.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub unit: Unit,
    pub start: usize,
    pub end: usize,
}

const fn seg(unit: Unit, start: usize, end: usize) -> Segment {
    Segment { unit, start, end }
}

/// Unit spans inside a 19-char timestamp.
pub const TIMESTAMP_SEGMENTS: [Segment; 6] = [
    seg(Unit::Year, 0, 4),
    seg(Unit::Month, 5, 7),
    seg(Unit::Day, 8, 10),
    seg(Unit::Hour, 11, 13),
    seg(Unit::Minute, 14, 16),
    seg(Unit::Second, 17, 19),
];

/// Unit spans inside a 10-char date.
pub const DATE_SEGMENTS: [Segment; 3] = [
    seg(Unit::Year, 0, 4),
    seg(Unit::Month, 5, 7),
    seg(Unit::Day, 8, 10),
];

/// Unit spans inside an 8-char time; a 5-char `HH:MM` yields an empty second.
pub const TIME_SEGMENTS: [Segment; 3] = [
    seg(Unit::Hour, 0, 2),
    seg(Unit::Minute, 3, 5),
    seg(Unit::Second, 6, 8),
];

/// First `n` chars of `s`, or all of it when shorter.
#[must_use]
pub fn clip(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Chars `start..end` of `s`; out-of-range spans collapse like slicing past
/// the end of a list does.
#[must_use]
pub fn span(s: &str, start: usize, end: usize) -> &str {
    let at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    &s[at(start)..at(end)]
}

fn chars(s: &str) -> usize {
    s.chars().count()
}

/// Consume `s` fully with `fmt`, range-checking every field.
fn parse_prefix(s: &str, fmt: &str) -> Option<Parsed> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, s, StrftimeItems::new(fmt)).ok()?;
    Some(parsed)
}

/// Like [`parse_prefix`] but additionally requires y-m-d to be a real
/// calendar date.
fn parse_calendar(s: &str, fmt: &str) -> bool {
    parse_prefix(s, fmt).is_some_and(|p| p.to_naive_date().is_ok())
}

/// `yyyy-mm-ddTHH:MM:SS` or `yyyy-mm-dd_HH:MM:SS`, exactly 19 chars.
#[must_use]
pub fn valid_timestamp(s: &str) -> bool {
    chars(s) == 19
        && ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d_%H:%M:%S"]
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
}

/// `yyyy-mm-dd` or `yyyy/mm/dd`, exactly 10 chars.
#[must_use]
pub fn valid_date(s: &str) -> bool {
    chars(s) == 10
        && ["%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}

/// `HH:MM:SS`, `HH.MM.SS` or the short `HH:MM` form.
#[must_use]
pub fn valid_time(s: &str) -> bool {
    match chars(s) {
        8 => ["%H:%M:%S", "%H.%M.%S"]
            .iter()
            .any(|fmt| NaiveTime::parse_from_str(s, fmt).is_ok()),
        5 => NaiveTime::parse_from_str(s, "%H:%M").is_ok(),
        _ => false,
    }
}

/// Period filter grammar: a timestamp truncated at any unit boundary.
#[must_use]
pub fn valid_period(s: &str) -> bool {
    match chars(s) {
        4 => parse_prefix(s, "%Y").is_some(),
        7 => parse_prefix(s, "%Y-%m").is_some(),
        10 => parse_calendar(s, "%Y-%m-%d"),
        13 => parse_calendar(s, "%Y-%m-%dT%H"),
        16 => parse_calendar(s, "%Y-%m-%dT%H:%M"),
        19 => parse_calendar(s, "%Y-%m-%dT%H:%M:%S"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_accepts_both_separators() {
        assert!(valid_timestamp("2024-07-15T23:59:59"));
        assert!(valid_timestamp("2024-07-15_23:59:59"));
        assert!(!valid_timestamp("2024-07-15 23:59:59"));
    }

    #[test]
    fn timestamp_is_calendar_aware() {
        assert!(!valid_timestamp("2024-02-30T00:00:00"));
        assert!(valid_timestamp("2024-02-29T00:00:00")); // leap year
        assert!(!valid_timestamp("2023-02-29T00:00:00"));
        assert!(!valid_timestamp("2024-13-01T00:00:00"));
        assert!(!valid_timestamp("2024-01-01T24:00:00"));
    }

    #[test]
    fn timestamp_needs_exact_width() {
        assert!(!valid_timestamp("2024-7-15T23:59:59"));
        assert!(!valid_timestamp("2024-07-15T23:59:59Z"));
    }

    #[test]
    fn date_forms() {
        assert!(valid_date("2024-07-15"));
        assert!(valid_date("2024/07/15"));
        assert!(!valid_date("2024-7-15"));
        assert!(!valid_date("2024-07-32"));
    }

    #[test]
    fn time_forms() {
        assert!(valid_time("23:59:59"));
        assert!(valid_time("23.59.59"));
        assert!(valid_time("23:59"));
        assert!(!valid_time("24:00"));
        assert!(!valid_time("23:59:"));
        assert!(!valid_time("9:30"));
    }

    #[test]
    fn period_prefixes() {
        assert!(valid_period("2024"));
        assert!(valid_period("2024-02"));
        assert!(valid_period("2024-02-29"));
        assert!(valid_period("2024-02-29T13"));
        assert!(valid_period("2024-02-29T13:45"));
        assert!(valid_period("2024-02-29T13:45:10"));
        assert!(!valid_period("2023-02-29"));
        assert!(!valid_period("2024-00"));
        assert!(!valid_period("2024-1"));
        assert!(!valid_period(""));
    }

    #[test]
    fn clip_and_span_respect_char_boundaries() {
        assert_eq!(clip("2024-07-15T23:59:59", 10), "2024-07-15");
        assert_eq!(clip("abc", 10), "abc");
        assert_eq!(clip("ärger", 2), "är");
        assert_eq!(span("2024-07-15", 5, 7), "07");
        assert_eq!(span("2024", 5, 7), "");
        assert_eq!(span("23:59", 6, 8), "");
    }

    #[test]
    fn prefix_lengths_follow_unit_order() {
        let lens: Vec<usize> = Unit::ALL.iter().map(|u| u.prefix_len()).collect();
        assert_eq!(lens, [4, 7, 10, 13, 16, 19]);
    }

    #[test]
    fn captions_are_nine_chars() {
        for u in Unit::ALL {
            assert_eq!(u.caption().chars().count(), 9);
            assert_eq!(u.sum_caption().chars().count(), 9);
        }
    }
}
