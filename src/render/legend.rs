//! Axis legends: adaptive-precision Y labels and the time-aware X line.
//!
//! The Y pipeline starts wide (up to eight significant fraction digits),
//! trims the zero columns every label shares, then drops to the first
//! fraction digit at which any two neighbouring labels still differ.
//! The X line places braille tick dots against the compressor's group
//! boundaries and paints each recorded prefix value in subscript digits,
//! newest first, skipping any label that would overlap an earlier one.

use crate::core::config::ChartConfig;
use crate::core::constants::MIN_LABEL_CELLS;
use crate::core::granularity::Tracks;
use crate::core::timestamp::Unit;
use crate::render::braille::{LEFT_TICK, RIGHT_TICK, glyph, mask_of};

/// Fitted Y-axis: one interpolated value per chart row plus the final
/// formatting parameters shared by every label.
pub struct YAxis {
    values: Vec<f64>,
    precision: usize,
    neg_pad: usize,
    int_width: usize,
}

impl YAxis {
    /// Interpolate `height` values from `max` (top row) down to `min` and
    /// settle the shared precision. `int_width`/`fraction` come from
    /// [`crate::core::bounds::label_precision`].
    #[must_use]
    pub fn fit(min: f64, max: f64, height: usize, int_width: usize, fraction: usize) -> Self {
        let span = max - min;
        #[allow(clippy::cast_precision_loss)]
        let values: Vec<f64> = (0..height)
            .map(|row| {
                let normalized = 1.0 - row as f64 / (height - 1) as f64;
                min + normalized * span
            })
            .collect();

        // Zero columns shared by every label can go outright.
        let width = 3 + int_width + 3;
        let shared = values
            .iter()
            .map(|v| {
                let text = format!("{v:>width$.fraction$}");
                text.len() - text.trim_end_matches('0').len()
            })
            .min()
            .unwrap_or(0);
        let trimmed = fraction - shared;

        let labels: Vec<String> = values.iter().map(|v| format!("{v:.trimmed$}")).collect();
        let mut precision = reduce(&labels, trimmed);
        if precision < 1 && widest_integer(&labels) < 4 {
            precision = 1;
        }
        let neg_pad = usize::from(precision == 7 && has_negative_zero(&labels));

        Self {
            values,
            precision,
            neg_pad,
            int_width,
        }
    }

    /// Label for `row`, right-aligned to [`YAxis::pad`] characters. A
    /// value that would print as nothing but zeros collapses to `0`.
    #[must_use]
    pub fn label(&self, row: usize) -> String {
        let value = self.values[row];
        let text = format!("{value:.prec$}", prec = self.precision);
        if text.chars().all(|c| matches!(c, '0' | '.' | '-')) {
            format!("{:>width$}", "0", width = self.pad())
        } else {
            format!(
                "{value:>width$.prec$}",
                width = 3 + self.neg_pad + self.int_width,
                prec = self.precision
            )
        }
    }

    /// Width of the label column; the X-axis aligns against this.
    #[must_use]
    pub fn pad(&self) -> usize {
        self.neg_pad + self.int_width + 3
    }
}

/// Minimal fraction precision still separating adjacent labels that agree
/// on the integer part; never more than `precision`.
fn reduce(labels: &[String], precision: usize) -> usize {
    if labels.len() < 2 {
        return precision;
    }
    let mut needed = 0;
    for pair in labels.windows(2) {
        let (int_a, frac_a) = split_label(&pair[0]);
        let (int_b, frac_b) = split_label(&pair[1]);
        if int_a != int_b {
            continue;
        }
        for pos in 0..frac_a.len().max(frac_b.len()) {
            let a = frac_a.as_bytes().get(pos).copied().unwrap_or(b'0');
            let b = frac_b.as_bytes().get(pos).copied().unwrap_or(b'0');
            if a != b {
                needed = needed.max(pos + 1);
                break;
            }
        }
    }
    needed.min(precision)
}

fn split_label(s: &str) -> (&str, &str) {
    s.split_once('.').unwrap_or((s, ""))
}

/// Longest integer part across the labels, sign excluded.
fn widest_integer(labels: &[String]) -> usize {
    labels
        .iter()
        .map(|s| split_label(s).0.trim_start_matches('-').len())
        .max()
        .unwrap_or(0)
}

fn has_negative_zero(labels: &[String]) -> bool {
    labels.iter().any(|s| s.starts_with("-0."))
}

/// Bare axis rule with no caption and no ticks.
#[must_use]
pub fn bare_axis(pad: usize, cells: usize) -> String {
    format!("{:>pad$} └{}", "", "─".repeat(cells))
}

/// The X-axis lines under the chart body; the caller has already checked
/// that time-awareness survived the run.
///
/// One line in summation mode (static category caption) or when no unit
/// qualifies; otherwise the captioned rule plus a tick/label line.
#[must_use]
pub fn x_axis_lines(
    tracks: &Tracks,
    cfg: &ChartConfig,
    boundaries: &[usize],
    pad: usize,
    cells: usize,
) -> Vec<String> {
    let rule = "─".repeat(cells);

    if let Some(unit) = cfg.sum_unit {
        return vec![format!(
            "{}{:>w$} └{rule}",
            unit.sum_caption(),
            "",
            w = pad - 9
        )];
    }

    if cells < MIN_LABEL_CELLS {
        return vec![bare_axis(pad, cells)];
    }

    // The densest unit still sparse enough to label; ties go to the
    // finer resolution.
    let threshold = cells / 2;
    let mut best: Option<Unit> = None;
    let mut best_len = 0;
    for unit in Unit::ALL {
        let n = tracks.track(unit).points.len();
        if n > 0 && n < threshold && n >= best_len {
            best = Some(unit);
            best_len = n;
        }
    }
    let Some(unit) = best else {
        return vec![bare_axis(pad, cells)];
    };
    let track = tracks.track(unit);

    let mut line: Vec<char> = vec![' '; cells];
    let mut tick_cols = Vec::with_capacity(track.points.len());
    for &point in &track.points {
        let slot = boundaries
            .iter()
            .position(|&b| point <= b)
            .unwrap_or(boundaries.len() - 1);
        let col = slot / 2;
        let bit = if slot % 2 == 0 { LEFT_TICK } else { RIGHT_TICK };
        line[col] = glyph(mask_of(line[col]).unwrap_or(0) | bit);
        tick_cols.push(col);
    }

    // Newest change first; a label claims its tick column plus a margin
    // and is dropped entirely on any overlap.
    for (&col, label) in tick_cols.iter().rev().zip(track.labels.iter().rev()) {
        let text = label.trim_start_matches('0');
        let text = if text.is_empty() { "0" } else { text };
        let len = text.chars().count();
        let fits = (0..len + cfg.label_margin)
            .all(|i| line.get(col + 1 + i).is_some_and(|&c| c == ' '));
        if fits {
            for (i, ch) in text.chars().enumerate() {
                line[col + 1 + i] = ch;
            }
        }
    }

    let body: String = line.into_iter().map(subscript).collect();
    vec![
        format!("{}{:>w$} └{rule}", unit.caption(), "", w = pad - 9),
        format!("{:>w$}{body}", "", w = pad + 2),
    ]
}

/// ASCII digits become Unicode subscripts; everything else passes through.
fn subscript(c: char) -> char {
    match c.to_digit(10) {
        Some(d) => char::from_u32(0x2080 + d).unwrap_or(c),
        None => c,
    }
}
