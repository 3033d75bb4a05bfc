//! Single-pass line ingestion: the numeric pipeline plus its time features.
//!
//! Order per line: count, split, detect, filter, parse, clamp, track. The
//! detector and tracker only ever see rows that carried enough fields for
//! the configured value column.

use crate::core::{
    bounds::integer_width,
    buckets::Buckets,
    config::ChartConfig,
    constants::KEPT_ERROR_LINES,
    detect::{Detector, TimeFields},
    filter,
    granularity::Tracks,
};

/// Counters surfaced by the diagnostics dump.
#[derive(Debug, Default, Clone)]
pub struct IngestStats {
    pub lines: usize,
    pub bytes: usize,
    pub errors: usize,
    pub skipped: usize,
    /// Line numbers of the first few parse failures.
    pub error_lines: Vec<usize>,
    pub load_secs: f64,
}

/// Streaming accumulator: feed lines, then [`Ingest::finish`].
pub struct Ingest<'a> {
    cfg: &'a ChartConfig,
    pub values: Vec<f64>,
    pub int_width: usize,
    pub stats: IngestStats,
    pub fields: TimeFields,
    pub detector: Detector,
    pub tracks: Tracks,
    pub buckets: Buckets,
}

/// Everything the renderer and diagnostics need once the stream ends.
#[derive(Debug)]
pub struct Loaded {
    /// Chart series; bucket sums when summation completed.
    pub values: Vec<f64>,
    pub int_width: usize,
    /// Accepted values before any bucket replacement.
    pub processed: usize,
    pub summed: bool,
    pub bucket_count: usize,
    pub stats: IngestStats,
    pub fields: TimeFields,
    pub detector: Detector,
    pub tracks: Tracks,
}

impl<'a> Ingest<'a> {
    #[must_use]
    pub fn new(cfg: &'a ChartConfig) -> Self {
        let cap = cfg.width.unwrap_or(cfg.term_cols) / 2;
        Self {
            cfg,
            values: Vec::new(),
            int_width: 0,
            stats: IngestStats::default(),
            fields: TimeFields::new(),
            detector: Detector::new(),
            tracks: Tracks::new(cap),
            buckets: Buckets::new(),
        }
    }

    /// Consume one input line (no trailing newline).
    pub fn push_line(&mut self, line: &str) {
        self.stats.lines += 1;
        self.stats.bytes += line.len() + 1;

        let mut row: Vec<&str> = Vec::new();
        let candidate = if let Some(col) = self.cfg.column {
            row = line.split_whitespace().collect();
            if row.len() < col {
                self.note_error();
                return;
            }
            if self.fields.usable && !self.fields.found {
                self.detector
                    .scan(&row, self.values.len(), self.stats.lines, &mut self.fields);
                if self.fields.found && self.cfg.sum_unit.is_some() {
                    self.buckets.enabled = true;
                }
            }
            if self.cfg.filtered() && !filter::admit(self.cfg, &self.fields, &row) {
                self.stats.skipped += 1;
                return;
            }
            row[col - 1]
        } else {
            line
        };

        let mut text = candidate.to_string();
        if let Some(sep) = self.cfg.separator {
            text.retain(|c| c != sep);
        }
        let text = text.trim().replace(',', ".");
        if text.is_empty() {
            return;
        }

        let Some(parsed) = parse_value(&text) else {
            self.note_error();
            return;
        };
        let mut value = (parsed + self.cfg.offset) * self.cfg.scale;
        if let Some(top) = self.cfg.top {
            if value > top {
                value = top;
            }
        }
        if let Some(bottom) = self.cfg.bottom {
            if value < bottom {
                value = bottom;
            }
        }

        let width = integer_width(value);
        if width > self.int_width {
            self.int_width = width;
        }
        self.values.push(value);

        if self.cfg.column.is_some() && self.fields.usable {
            self.tracks.observe(
                &row,
                self.values.len(),
                value,
                &mut self.fields,
                &mut self.buckets,
                self.cfg.sum_unit,
            );
        }
    }

    /// End of stream: apply bucket replacement and hand everything over.
    #[must_use]
    pub fn finish(mut self) -> Loaded {
        let processed = self.values.len();
        let mut summed = false;
        if self.buckets.enabled
            && self.fields.format_errors == 0
            && processed > 0
            && !self.buckets.is_empty()
        {
            self.values = self.buckets.series();
            self.int_width = self
                .values
                .iter()
                .copied()
                .map(integer_width)
                .max()
                .unwrap_or(0);
            summed = true;
        }
        Loaded {
            bucket_count: self.buckets.len(),
            processed,
            summed,
            values: self.values,
            int_width: self.int_width,
            stats: self.stats,
            fields: self.fields,
            detector: self.detector,
            tracks: self.tracks,
        }
    }

    fn note_error(&mut self) {
        if self.stats.error_lines.len() < KEPT_ERROR_LINES {
            self.stats.error_lines.push(self.stats.lines);
        }
        self.stats.errors += 1;
    }
}

fn parse_value(text: &str) -> Option<f64> {
    lexical_core::parse::<f64>(text.as_bytes())
        .ok()
        .filter(|v| v.is_finite())
}
