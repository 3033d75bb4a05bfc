pub mod diag;
pub mod input;
pub mod parse;
pub mod sigint;

use std::io::IsTerminal;
use std::time::Instant;

use clap::{CommandFactory, Parser};
pub use parse::Cli;

use crate::core::bounds::{braille_cells, label_precision, terminal_columns};
use crate::core::error::ChartError;
use crate::core::ingest::Ingest;
use crate::render::{chart, compress};

/// One full run: parse, ingest, chart, optional diagnostics.
pub fn run() -> Result<(), ChartError> {
    sigint::install();

    let mut argv = std::env::args();
    let argv0 = argv.next().unwrap_or_else(|| "uchart".to_owned());
    let bare_invocation = argv.len() == 0;
    let (filters, cleaned) = parse::extract_filters(argv);
    let cli = Cli::parse_from(std::iter::once(argv0).chain(cleaned));

    if cli.version {
        println!("uChart {}", Cli::command().get_version().unwrap_or("?"));
        return Ok(());
    }

    // Interactive call with nothing to read: show usage instead of waiting
    // on a silent stdin.
    if bare_invocation && std::io::stdin().is_terminal() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let (cfg, files) = cli.into_parts(&filters, terminal_columns());

    let mut source = input::open(files)?;
    let mut ingest = Ingest::new(&cfg);
    let started = Instant::now();
    while let Some(line) = source.next_line()? {
        if sigint::interrupted() {
            return Err(ChartError::Interrupted {
                loaded: ingest.values.len(),
            });
        }
        ingest.push_line(&line);
    }
    if sigint::interrupted() {
        return Err(ChartError::Interrupted {
            loaded: ingest.values.len(),
        });
    }
    ingest.stats.load_secs = started.elapsed().as_secs_f64();
    let loaded = ingest.finish();

    if loaded.values.is_empty() {
        if cfg.debug {
            diag::print_empty(&loaded);
        }
        return Ok(());
    }

    let (int_width, fraction) = label_precision(loaded.int_width);
    let cells = braille_cells(&cfg, int_width, fraction);
    let series = compress::compress(&loaded.values, &cfg, cells);
    print!("{}", chart::render(&cfg, &loaded, &series));

    if cfg.debug {
        diag::print_report(&cfg, &loaded, series.cells(), series.factor);
    }
    Ok(())
}
