//! Public-facing crate root – re-exports + one-shot helper.

pub mod cli;
pub mod core;
pub mod render;

pub use core::{
    config::{ChartConfig, ConfigBuilder},
    error::ChartError,
    ingest::{Ingest, Loaded},
    timestamp::Unit,
};

pub use render::{Compressed, compress, render};

use core::bounds::{braille_cells, label_precision};

/// Convenience function for static input: ingest `lines` under `cfg` and
/// return the rendered chart text (empty when nothing charted).
pub fn chart_lines<'a, I>(lines: I, cfg: &ChartConfig) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ingest = Ingest::new(cfg);
    for line in lines {
        ingest.push_line(line);
    }
    let loaded = ingest.finish();
    if loaded.values.is_empty() {
        return String::new();
    }

    let (int_width, fraction) = label_precision(loaded.int_width);
    let cells = braille_cells(cfg, int_width, fraction);
    let series = compress(&loaded.values, cfg, cells);
    render(cfg, &loaded, &series)
}
