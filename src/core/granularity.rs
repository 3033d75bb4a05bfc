//! Multi-resolution change tracking feeding the x-axis legend.
//!
//! Each accepted value compares the row's time prefix against the last one
//! seen. A change cascades coarse to fine: the first differing unit and
//! every finer unit record (value ordinal, new slice). Housekeeping every
//! 5th value prunes units too dense to label and strictly re-validates the
//! current prefix; a validation failure permanently disables time-awareness
//! and summation. Every 100th value a fully deactivated category is revived
//! so a stream that settles into a new regime can still earn labels.

use crate::core::buckets::Buckets;
use crate::core::constants::{PRUNE_INTERVAL, REVIVE_INTERVAL};
use crate::core::detect::TimeFields;
use crate::core::timestamp::{
    DATE_SEGMENTS, Segment, TIME_SEGMENTS, TIMESTAMP_SEGMENTS, Unit, clip, span, valid_date,
    valid_time, valid_timestamp,
};

/// Change history for one resolution unit.
#[derive(Debug, Clone, Default)]
pub struct UnitTrack {
    pub active: bool,
    /// Value ordinal of each crossing.
    pub points: Vec<usize>,
    /// Slice value that came into effect at that crossing.
    pub labels: Vec<String>,
}

impl UnitTrack {
    fn record(&mut self, ordinal: usize, label: &str) {
        if self.active {
            self.points.push(ordinal);
            self.labels.push(label.to_string());
        }
    }

    fn deactivate(&mut self) {
        self.points.clear();
        self.labels.clear();
        self.active = false;
    }

    fn reset(&mut self) {
        self.points.clear();
        self.labels.clear();
        self.active = true;
    }
}

/// The six unit tracks plus the startup density cap.
#[derive(Debug)]
pub struct Tracks {
    pub units: [UnitTrack; 6],
    density_cap: usize,
}

impl Tracks {
    /// `density_cap` is half the configured-or-terminal width: more
    /// crossings than that can never be labelled, so the unit is dropped.
    #[must_use]
    pub fn new(density_cap: usize) -> Self {
        Self {
            units: std::array::from_fn(|_| UnitTrack {
                active: true,
                ..UnitTrack::default()
            }),
            density_cap,
        }
    }

    #[must_use]
    pub fn track(&self, unit: Unit) -> &UnitTrack {
        &self.units[unit.index()]
    }

    /// Feed one accepted value. `ordinal` is 1-based; `row` holds the split
    /// fields of the line it came from.
    pub fn observe(
        &mut self,
        row: &[&str],
        ordinal: usize,
        value: f64,
        fields: &mut TimeFields,
        buckets: &mut Buckets,
        sum_unit: Option<Unit>,
    ) {
        let field = |col: usize| row.get(col).copied().unwrap_or("");

        if let Some(col) = fields.timestamp {
            let current = clip(field(col), 19).to_string();
            if fields.last_timestamp.as_deref() != Some(current.as_str()) {
                if let Some(last) = fields.last_timestamp.take() {
                    self.cascade(&last, &current, &TIMESTAMP_SEGMENTS, ordinal);
                }
                fields.last_timestamp = Some(current);
            }
        } else {
            if let Some(col) = fields.date {
                let current = clip(field(col), 10).to_string();
                if fields.last_date.as_deref() != Some(current.as_str()) {
                    if let Some(last) = fields.last_date.take() {
                        self.cascade(&last, &current, &DATE_SEGMENTS, ordinal);
                    }
                    fields.last_date = Some(current);
                }
            }
            if let Some(col) = fields.time {
                let current = clip(field(col), 8).to_string();
                if fields.last_time.as_deref() != Some(current.as_str()) {
                    if let Some(last) = fields.last_time.take() {
                        self.cascade(&last, &current, &TIME_SEGMENTS, ordinal);
                    }
                    fields.last_time = Some(current);
                }
            }
        }

        if ordinal % PRUNE_INTERVAL == 0 {
            self.prune(fields);
            revalidate(fields);
            if fields.format_errors > 0 {
                fields.usable = false;
                buckets.discard();
                self.wipe();
                return;
            }
            if ordinal % REVIVE_INTERVAL == 0 {
                self.revive(fields);
            }
        }

        if let Some(unit) = sum_unit {
            if buckets.enabled {
                let key = match fields.timestamp {
                    Some(col) => clip(field(col), unit.prefix_len()).to_string(),
                    None => {
                        let composite = fields.composite(row);
                        clip(&composite, unit.prefix_len()).to_string()
                    }
                };
                buckets.add(key, value);
            }
        }
    }

    fn cascade(&mut self, last: &str, current: &str, segments: &[Segment], ordinal: usize) {
        let mut crossed = false;
        for s in segments {
            let fresh = span(current, s.start, s.end);
            if !crossed && span(last, s.start, s.end) == fresh {
                continue;
            }
            crossed = true;
            self.units[s.unit.index()].record(ordinal, fresh);
        }
    }

    fn prune(&mut self, fields: &TimeFields) {
        for range in category_spans(fields) {
            for track in &mut self.units[range] {
                if track.points.len() > self.density_cap {
                    track.deactivate();
                }
            }
        }
    }

    fn revive(&mut self, fields: &TimeFields) {
        for range in category_spans(fields) {
            if self.units[range.clone()].iter().all(|t| !t.active) {
                for track in &mut self.units[range] {
                    track.reset();
                }
            }
        }
    }

    /// Drop every record and stop collecting; used on format violations.
    pub fn wipe(&mut self) {
        for track in &mut self.units {
            track.deactivate();
        }
    }
}

/// Unit index ranges of the adopted categories.
fn category_spans(fields: &TimeFields) -> Vec<std::ops::Range<usize>> {
    if fields.timestamp.is_some() {
        return vec![0..6];
    }
    let mut spans = Vec::new();
    if fields.date.is_some() {
        spans.push(0..3);
    }
    if fields.time.is_some() {
        spans.push(3..6);
    }
    spans
}

/// Strict grammar check of the most recent prefixes.
fn revalidate(fields: &mut TimeFields) {
    if fields.timestamp.is_some() {
        if !fields.last_timestamp.as_deref().is_some_and(valid_timestamp) {
            fields.format_errors += 1;
        }
    } else {
        if fields.date.is_some() && !fields.last_date.as_deref().is_some_and(valid_date) {
            fields.format_errors += 1;
        }
        if fields.time.is_some() && !fields.last_time.as_deref().is_some_and(valid_time) {
            fields.format_errors += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp_fields(baseline: &str) -> TimeFields {
        TimeFields {
            timestamp: Some(0),
            last_timestamp: Some(baseline.to_string()),
            found: true,
            ..TimeFields::new()
        }
    }

    #[test]
    fn second_change_then_day_cascade() {
        let mut tracks = Tracks::new(50);
        let mut fields = timestamp_fields("2024-01-01T00:00:00");
        let mut buckets = Buckets::new();

        tracks.observe(
            &["2024-01-01T00:00:01"],
            2,
            1.0,
            &mut fields,
            &mut buckets,
            None,
        );
        tracks.observe(
            &["2024-01-02T00:00:00"],
            3,
            1.0,
            &mut fields,
            &mut buckets,
            None,
        );

        assert_eq!(tracks.track(Unit::Second).points, [2, 3]);
        assert_eq!(tracks.track(Unit::Second).labels, ["01", "00"]);
        assert_eq!(tracks.track(Unit::Day).points, [3]);
        assert_eq!(tracks.track(Unit::Day).labels, ["02"]);
        assert_eq!(tracks.track(Unit::Hour).points, [3], "cascade reaches finer units");
        assert!(tracks.track(Unit::Year).points.is_empty());
        assert!(tracks.track(Unit::Month).points.is_empty());
    }

    #[test]
    fn dense_unit_is_pruned() {
        let mut tracks = Tracks::new(2);
        let mut fields = timestamp_fields("2024-01-01T00:00:00");
        let mut buckets = Buckets::new();

        for i in 1..=5 {
            let stamp = format!("2024-01-01T00:00:{i:02}");
            tracks.observe(
                &[stamp.as_str()],
                i,
                1.0,
                &mut fields,
                &mut buckets,
                None,
            );
        }

        let seconds = tracks.track(Unit::Second);
        assert!(!seconds.active);
        assert!(seconds.points.is_empty());
        assert!(tracks.track(Unit::Minute).active, "sparse units survive");
        assert!(fields.usable);
    }

    #[test]
    fn format_violation_kills_time_awareness() {
        let mut tracks = Tracks::new(50);
        let mut fields = timestamp_fields("2024-01-01T00:00:00");
        let mut buckets = Buckets::new();
        buckets.enabled = true;

        for i in 1..=4 {
            let stamp = format!("2024-01-01T00:00:{i:02}");
            tracks.observe(
                &[stamp.as_str()],
                i,
                1.0,
                &mut fields,
                &mut buckets,
                Some(Unit::Day),
            );
        }
        assert_eq!(buckets.len(), 1);

        tracks.observe(&["not-a-time"], 5, 1.0, &mut fields, &mut buckets, Some(Unit::Day));

        assert!(!fields.usable);
        assert_eq!(fields.format_errors, 1);
        assert!(!buckets.enabled);
        assert!(buckets.is_empty());
        assert!(tracks.units.iter().all(|t| !t.active && t.points.is_empty()));
    }

    #[test]
    fn deactivated_category_revives_at_hundred() {
        let mut tracks = Tracks::new(1);
        let mut fields = TimeFields {
            time: Some(0),
            last_time: Some("00:00:00".to_string()),
            found: true,
            ..TimeFields::new()
        };
        let mut buckets = Buckets::new();

        for i in 1..=100 {
            let t = format!("{:02}:{:02}:{:02}", i % 24, i % 60, i % 60);
            tracks.observe(&[t.as_str()], i, 1.0, &mut fields, &mut buckets, None);
        }

        for unit in [Unit::Hour, Unit::Minute, Unit::Second] {
            let track = tracks.track(unit);
            assert!(track.active, "{unit:?} should be fresh after revival");
            assert!(track.points.is_empty());
        }
        assert!(fields.usable);
    }

    #[test]
    fn date_mode_tracks_only_date_units() {
        let mut tracks = Tracks::new(50);
        let mut fields = TimeFields {
            date: Some(1),
            last_date: Some("2024-12-31".to_string()),
            found: true,
            ..TimeFields::new()
        };
        let mut buckets = Buckets::new();

        tracks.observe(
            &["9", "2025-01-01"],
            2,
            9.0,
            &mut fields,
            &mut buckets,
            None,
        );

        assert_eq!(tracks.track(Unit::Year).labels, ["2025"]);
        assert_eq!(tracks.track(Unit::Month).labels, ["01"]);
        assert_eq!(tracks.track(Unit::Day).labels, ["01"]);
        assert!(tracks.track(Unit::Hour).points.is_empty());
    }

    #[test]
    fn summation_keys_truncate_and_synthesize() {
        let mut tracks = Tracks::new(50);
        let mut fields = timestamp_fields("2024-01-01T00:00:00");
        let mut buckets = Buckets::new();
        buckets.enabled = true;

        tracks.observe(
            &["2024-01-05T10:00:00"],
            2,
            10.0,
            &mut fields,
            &mut buckets,
            Some(Unit::Month),
        );
        tracks.observe(
            &["2024-02-01T00:00:00"],
            3,
            5.0,
            &mut fields,
            &mut buckets,
            Some(Unit::Month),
        );
        assert_eq!(buckets.keys(), ["2024-01", "2024-02"]);

        // date-only stream summed per hour pads with the time sentinel
        let mut tracks = Tracks::new(50);
        let mut fields = TimeFields {
            date: Some(0),
            last_date: Some("2024-01-01".to_string()),
            found: true,
            ..TimeFields::new()
        };
        let mut buckets = Buckets::new();
        buckets.enabled = true;
        tracks.observe(
            &["2024-01-01", "3"],
            2,
            3.0,
            &mut fields,
            &mut buckets,
            Some(Unit::Hour),
        );
        assert_eq!(buckets.keys(), ["2024-01-01T00"]);
    }
}
