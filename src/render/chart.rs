//! One-shot chart assembly: header line, Y-labelled braille rows, X axis.

use crate::core::bounds::label_precision;
use crate::core::config::ChartConfig;
use crate::core::ingest::Loaded;
use crate::render::braille::Canvas;
use crate::render::compress::Compressed;
use crate::render::legend::{self, YAxis};

/// Render the full chart text. Returns an empty string when there is
/// nothing to plot.
///
/// The vertical scale spans the extrema of the pre-compression series;
/// a configured top or bottom override replaces its side of the scale
/// outright.
#[must_use]
pub fn render(cfg: &ChartConfig, loaded: &Loaded, series: &Compressed) -> String {
    if loaded.values.is_empty() || series.unit_count() == 0 {
        return String::new();
    }

    let mut min = loaded.values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = loaded
        .values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if let Some(top) = cfg.top {
        max = top;
    }
    if let Some(bottom) = cfg.bottom {
        min = bottom;
    }

    let mut out = String::new();
    push_header(&mut out, cfg, loaded, series);

    let (int_width, fraction) = label_precision(loaded.int_width);
    let axis = cfg
        .show_legend
        .then(|| YAxis::fit(min, max, cfg.height, int_width, fraction));
    let canvas = Canvas::plot(series, min, max, cfg.height);

    for row in 0..cfg.height {
        if let Some(axis) = &axis {
            out.push_str(&axis.label(row));
            out.push_str(" │");
        }
        out.push_str(&canvas.line(row));
        out.push('\n');
    }

    if let Some(axis) = &axis {
        let pad = axis.pad();
        let cells = series.cells();
        let lines = if loaded.fields.found && loaded.fields.usable {
            legend::x_axis_lines(&loaded.tracks, cfg, &series.boundaries, pad, cells)
        } else {
            vec![legend::bare_axis(pad, cells)]
        };
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Stats line unless a custom title overrides it; an empty title
/// suppresses the header entirely.
fn push_header(out: &mut String, cfg: &ChartConfig, loaded: &Loaded, series: &Compressed) {
    match &cfg.title {
        None => {
            let n = loaded.values.len();
            if cfg.multi {
                out.push_str(&format!(
                    "\n[{n} values in {} columns; {} values in a column]\n",
                    series.unit_count(),
                    series.factor
                ));
            } else if series.factor == 1 {
                out.push_str(&format!("\n[{n} values]\n"));
            } else {
                out.push_str(&format!(
                    "\n[{n} values; average of {} values in a column]\n",
                    series.factor
                ));
            }
        }
        Some(title) if !title.is_empty() => {
            out.push_str(title);
            out.push('\n');
        }
        Some(_) => {}
    }
}
