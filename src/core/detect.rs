//! One-shot search for the timestamp / date / time columns of a stream.
//!
//! Runs on each accepted row until something is adopted or ten values have
//! been parsed. Exactly one field matching a grammar adopts it; ambiguity
//! retries on the next row. A full timestamp column makes separate date and
//! time columns redundant, so its adoption suppresses both.

use crate::core::constants::DETECT_ATTEMPTS;
use crate::core::timestamp::{clip, valid_date, valid_time, valid_timestamp};

/// Adopted time columns plus the running state the tracker keeps per stream.
#[derive(Debug, Clone)]
pub struct TimeFields {
    /// Cleared permanently on detection failure or a format violation.
    pub usable: bool,
    /// Set the moment any column is adopted.
    pub found: bool,
    pub timestamp: Option<usize>,
    pub date: Option<usize>,
    pub time: Option<usize>,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub first_time: Option<String>,
    pub last_time: Option<String>,
    /// Strict re-validation failures seen so far.
    pub format_errors: usize,
    /// Line number and attempt ordinal of the first adoption.
    pub first_hit: Option<(usize, usize)>,
}

impl Default for TimeFields {
    fn default() -> Self {
        Self {
            usable: true,
            found: false,
            timestamp: None,
            date: None,
            time: None,
            first_timestamp: None,
            last_timestamp: None,
            first_date: None,
            last_date: None,
            first_time: None,
            last_time: None,
            format_errors: 0,
            first_hit: None,
        }
    }
}

impl TimeFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `date T time` synthesized from the adopted columns of `row`, with
    /// `0000-00-00` / `00:00:00` sentinels for the missing side.
    #[must_use]
    pub fn composite(&self, row: &[&str]) -> String {
        let field = |col: usize| row.get(col).copied().unwrap_or("");
        let date = self.date.map_or("0000-00-00", |c| clip(field(c), 10));
        let time = self.time.map_or("00:00:00", |c| clip(field(c), 8));
        format!("{date}T{time}")
    }
}

/// Attempt and per-grammar hit counters for the diagnostics dump.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detector {
    pub attempts: usize,
    pub timestamp_hits: usize,
    pub date_hits: usize,
    pub time_hits: usize,
}

impl Detector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Examine one row's fields. `values_seen` is the count of values
    /// accepted before this row, `line_no` the 1-based input line.
    pub fn scan(
        &mut self,
        row: &[&str],
        values_seen: usize,
        line_no: usize,
        fields: &mut TimeFields,
    ) {
        if values_seen == DETECT_ATTEMPTS {
            fields.usable = false;
            return;
        }
        self.attempts += 1;
        let attempt = values_seen + 1;

        let stamps: Vec<usize> = hits(row, |f| valid_timestamp(clip(f, 19)));
        self.timestamp_hits += stamps.len();
        if let [col] = stamps[..] {
            let prefix = clip(row[col], 19).to_string();
            fields.timestamp = Some(col);
            fields.first_timestamp = Some(prefix.clone());
            fields.last_timestamp = Some(prefix);
            fields.found = true;
            fields.first_hit = Some((line_no, attempt));
            return;
        }

        let dates: Vec<usize> = hits(row, |f| valid_date(clip(f, 10)));
        self.date_hits += dates.len();
        let times: Vec<usize> = hits(row, |f| valid_time(clip(f, 8)));
        self.time_hits += times.len();

        if let [col] = dates[..] {
            let prefix = clip(row[col], 10).to_string();
            fields.date = Some(col);
            fields.first_date = Some(prefix.clone());
            fields.last_date = Some(prefix);
            fields.found = true;
            fields.first_hit = Some((line_no, attempt));
        }
        if let [col] = times[..] {
            let prefix = clip(row[col], 8).to_string();
            fields.time = Some(col);
            fields.first_time = Some(prefix.clone());
            fields.last_time = Some(prefix);
            fields.found = true;
            fields.first_hit = Some((line_no, attempt));
        }
    }
}

fn hits(row: &[&str], matches: impl Fn(&str) -> bool) -> Vec<usize> {
    row.iter()
        .enumerate()
        .filter(|(_, f)| matches(f))
        .map(|(i, _)| i)
        .collect()
}
