//! Row admission against the target / from / to period filters.
//!
//! With a timestamp column, prefixes compare raw; with date/time columns
//! the sentinel-padded composite compares digits-only, so `2024-02` and
//! `2024/02/…` line up. Before adoption the all-sentinel composite is what
//! gets compared, which filters the leading rows of a bounded run.

use crate::core::config::ChartConfig;
use crate::core::detect::TimeFields;
use crate::core::timestamp::clip;

fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// True when the row passes every configured filter.
#[must_use]
pub fn admit(cfg: &ChartConfig, fields: &TimeFields, row: &[&str]) -> bool {
    let field = |col: usize| row.get(col).copied().unwrap_or("");

    if let Some(target) = cfg.target.as_deref() {
        if let Some(col) = fields.timestamp {
            if clip(field(col), target.chars().count()) == target {
                return true;
            }
            // fall through: a from/to window may still admit the row
        } else {
            let composite = fields.composite(row);
            return digits(clip(&composite, target.chars().count())) == digits(target);
        }
    }

    let mut from_ok = false;
    let mut to_ok = false;
    if let Some(col) = fields.timestamp {
        if let Some(from) = cfg.from.as_deref() {
            from_ok = clip(field(col), from.chars().count()) >= from;
        }
        if let Some(to) = cfg.to.as_deref() {
            to_ok = clip(field(col), to.chars().count()) <= to;
        }
    } else {
        let composite = fields.composite(row);
        if let Some(from) = cfg.from.as_deref() {
            from_ok = digits(clip(&composite, from.chars().count())) >= digits(from);
        }
        if let Some(to) = cfg.to.as_deref() {
            to_ok = digits(clip(&composite, to.chars().count())) <= digits(to);
        }
    }
    if cfg.from.is_none() {
        from_ok = true;
    }
    if cfg.to.is_none() {
        to_ok = true;
    }
    (cfg.from.is_some() || cfg.to.is_some()) && from_ok && to_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(target: Option<&str>, from: Option<&str>, to: Option<&str>) -> ChartConfig {
        ChartConfig::builder()
            .target(target.map(String::from))
            .from(from.map(String::from))
            .to(to.map(String::from))
            .build()
    }

    fn stamp_fields() -> TimeFields {
        TimeFields {
            timestamp: Some(0),
            found: true,
            ..TimeFields::new()
        }
    }

    #[test]
    fn target_matches_timestamp_prefix() {
        let cfg = cfg(Some("2024-07"), None, None);
        let fields = stamp_fields();
        assert!(admit(&cfg, &fields, &["2024-07-15T00:00:00", "1"]));
        assert!(!admit(&cfg, &fields, &["2024-08-01T00:00:00", "1"]));
    }

    #[test]
    fn target_miss_can_still_pass_a_window() {
        let cfg = cfg(Some("2023"), Some("2024"), None);
        let fields = stamp_fields();
        assert!(admit(&cfg, &fields, &["2024-01-01T00:00:00", "1"]));
        assert!(!admit(&cfg, &fields, &["2022-01-01T00:00:00", "1"]));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let cfg = cfg(None, Some("2024-02"), Some("2024-03"));
        let fields = stamp_fields();
        assert!(admit(&cfg, &fields, &["2024-02-01T00:00:00"]));
        assert!(admit(&cfg, &fields, &["2024-03-31T23:59:59"]));
        assert!(!admit(&cfg, &fields, &["2024-01-31T00:00:00"]));
        assert!(!admit(&cfg, &fields, &["2024-04-01T00:00:00"]));
    }

    #[test]
    fn date_mode_compares_digits_only() {
        let cfg = cfg(Some("2024-02"), None, None);
        let fields = TimeFields {
            date: Some(1),
            found: true,
            ..TimeFields::new()
        };
        assert!(admit(&cfg, &fields, &["7", "2024/02/10"]));
        assert!(!admit(&cfg, &fields, &["7", "2024/03/10"]));
    }

    #[test]
    fn date_mode_target_decides_alone() {
        // unlike the timestamp path, a miss is final even with a window set
        let cfg = cfg(Some("2023"), Some("2020"), None);
        let fields = TimeFields {
            date: Some(0),
            found: true,
            ..TimeFields::new()
        };
        assert!(!admit(&cfg, &fields, &["2024-01-01"]));
    }

    #[test]
    fn sentinel_composite_blocks_rows_before_adoption() {
        let cfg = cfg(None, Some("2024"), None);
        let fields = TimeFields::new();
        assert!(!admit(&cfg, &fields, &["garbage", "5"]));
    }

    #[test]
    fn time_only_stream_uses_date_sentinel() {
        let cfg = cfg(None, None, Some("0000-00-00T12"));
        let fields = TimeFields {
            time: Some(0),
            found: true,
            ..TimeFields::new()
        };
        assert!(admit(&cfg, &fields, &["11:59:59"]));
        assert!(!admit(&cfg, &fields, &["13:00:00"]));
    }
}
