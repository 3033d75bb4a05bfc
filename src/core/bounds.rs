//! Geometry helpers: terminal size plumbing, label widths, cell counts.

use terminal_size::{Width, terminal_size};

use crate::core::{config::ChartConfig, constants::FALLBACK_COLUMNS};

/// Current terminal width in columns (80 fallback).
#[inline]
#[must_use]
pub fn terminal_columns() -> usize {
    terminal_size().map_or(FALLBACK_COLUMNS, |(Width(w), _)| usize::from(w))
}

/// Y-label shape for a given integer width: `(integer chars, fraction chars)`.
///
/// Narrow integer parts widen to 6 chars and spend the slack on fraction
/// digits; wide ones keep two fraction digits.
#[inline]
#[must_use]
pub fn label_precision(int_width: usize) -> (usize, usize) {
    if int_width < 6 {
        (6, 8 - int_width)
    } else {
        (int_width, 2)
    }
}

/// Braille cells available for the chart body.
///
/// With the legend shown, the label reserve comes off the terminal width
/// and an explicit width only shrinks the result. Without the legend the
/// whole terminal minus the border is used.
#[must_use]
pub fn braille_cells(cfg: &ChartConfig, int_width: usize, fraction: usize) -> usize {
    let reserve = int_width + 1 + fraction + 2 + 2;
    let fitted = cfg.term_cols.saturating_sub(reserve);
    let chart = match cfg.width {
        Some(w) if w < fitted => w,
        _ => fitted,
    };
    let cells = if cfg.show_legend {
        chart
    } else {
        cfg.term_cols.saturating_sub(2)
    };
    cells.max(1)
}

/// Decimal width of the truncated integer part, sign included.
#[must_use]
pub fn integer_width(v: f64) -> usize {
    let t = v.trunc();
    let t = if t == 0.0 { 0.0 } else { t }; // never "-0"
    format!("{t:.0}").len()
}
