//! Command-line surface: the clap flags plus the free-form `key=` time
//! filters that are peeled off the argument list before clap sees it.

use clap::{ArgAction, Parser};

use crate::core::config::ChartConfig;
use crate::core::timestamp::{Unit, valid_period};

const FILTER_HELP: &str = "optional time filters:
   target=  requested period only
   from=    requested period start (including)
   to=      requested period end (including)

   Supported formats:
   yyyy | yyyy-mm | yyyy-mm-dd | yyyy-mm-ddThh |
   yyyy-mm-ddThh:mm | yyyy-mm-ddThh:mm:ss
";

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "uchart",
    display_name = "uChart",
    version = "0.9.25",
    disable_version_flag = true,
    about = "Braille charts for numeric and time-series streams in the terminal",
    after_help = FILTER_HELP
)]
pub struct Cli {
    /// Show program's version number and exit.
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Chart height in lines (default: 7)
    #[arg(
        short = 'y',
        long,
        value_name = "N",
        default_value_t = 7,
        hide_default_value = true
    )]
    pub height: i32,

    /// Maximum chart width in characters.
    #[arg(short = 'x', long, value_name = "N")]
    pub width: Option<i32>,

    /// Plot all individual values instead of just the mean.
    #[arg(short = 'm', long)]
    pub multi: bool,

    /// Additional information about the processing of input data.
    #[arg(short = 'X', long = "debug-mode")]
    pub debug: bool,

    /// Column number with optional time aggregation.
    #[arg(short = 'c', long, value_name = "N[y|m|d|H|M|S]")]
    pub column: Option<String>,

    /// Do not display the chart legend.
    #[arg(short = 'l', long = "no-legend", action = ArgAction::SetFalse)]
    pub legend: bool,

    /// Custom chart title. (overrides default stats)
    #[arg(short = 'n', long, value_name = "TEXT")]
    pub note: Option<String>,

    /// Maximum value in chart. (upper limit of Y-axis)
    #[arg(
        short = 't',
        long = "top-value",
        value_name = "N",
        allow_negative_numbers = true
    )]
    pub top: Option<f64>,

    /// Minimum value in chart. (lower limit of Y-axis)
    #[arg(
        short = 'b',
        long = "bottom-value",
        value_name = "N",
        allow_negative_numbers = true
    )]
    pub bottom: Option<f64>,

    /// Shift decimal point. (e.g. -6 = ÷1_000_000, 3 = ×1_000)
    #[arg(short = 's', long, value_name = "N", allow_negative_numbers = true)]
    pub shift: Option<i32>,

    /// The constant that will be added to each item. (default: 0)
    #[arg(
        short = 'a',
        long,
        value_name = "N",
        default_value_t = 0.0,
        hide_default_value = true,
        allow_negative_numbers = true
    )]
    pub add: f64,

    /// If numbers contain thousands separator, specify it: ',' or '.' (e.g. -f ,)
    #[arg(short = 'f', long = "format", value_name = "SEP", value_parser = [",", "."])]
    pub separator: Option<String>,

    /// The input data file, if not specified, is read from stdin.
    #[arg(value_name = "FILE")]
    pub file: Vec<String>,
}

impl Cli {
    /// Fold the parsed flags and the extracted filters into the run
    /// configuration. The free-form specs validate as leniently as the
    /// flags do: a bad value falls back instead of aborting.
    #[must_use]
    pub fn into_parts(self, filters: &Filters, term_cols: usize) -> (ChartConfig, Vec<String>) {
        let (column, sum_unit) = match self.column.as_deref() {
            Some(spec) => parse_column(spec),
            None => (None, None),
        };
        let cfg = ChartConfig::builder()
            .height(self.height)
            .width(self.width)
            .multi(self.multi)
            .legend(self.legend)
            .title(self.note)
            .top(self.top)
            .bottom(self.bottom)
            .shift(self.shift)
            .offset(self.add)
            .separator(self.separator.as_deref().and_then(|s| s.chars().next()))
            .column(column)
            .sum_unit(sum_unit)
            .target(period(filters.target.as_deref()))
            .from(period(filters.from.as_deref()))
            .to(period(filters.to.as_deref()))
            .label_margin(margin(filters.space.as_deref()))
            .debug(self.debug)
            .term_cols(term_cols)
            .build();
        (cfg, self.file)
    }
}

/// Raw `key=value` filter arguments; a repeated key keeps the last value.
#[derive(Debug, Default)]
pub struct Filters {
    pub target: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub space: Option<String>,
}

/// Split `target= from= to= space=` arguments out of `args`; everything
/// else is passed through to clap. A bare `key=` with no value stays
/// positional.
pub fn extract_filters<I>(args: I) -> (Filters, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let mut filters = Filters::default();
    let mut cleaned = Vec::new();
    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            if !value.is_empty() {
                let slot = match key {
                    "target" => Some(&mut filters.target),
                    "from" => Some(&mut filters.from),
                    "to" => Some(&mut filters.to),
                    "space" => Some(&mut filters.space),
                    _ => None,
                };
                if let Some(slot) = slot {
                    *slot = Some(value.to_owned());
                    continue;
                }
            }
        }
        cleaned.push(arg);
    }
    (filters, cleaned)
}

/// Parse a `-c` column spec: a bare 1-based index, or an index with one
/// unit letter on either side. A bad spec warns and turns column mode off
/// instead of aborting.
#[must_use]
pub fn parse_column(spec: &str) -> (Option<usize>, Option<Unit>) {
    if spec.is_empty() {
        return (None, None);
    }
    let cleaned: String = spec.chars().filter(char::is_ascii_alphanumeric).collect();

    if !cleaned.is_empty() && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(index) = column_index(&cleaned) {
            return (Some(index), None);
        }
    } else if let Some((index, unit)) = modifier_form(&cleaned) {
        return (Some(index), Some(unit));
    }

    eprintln!(
        "Invalid -c option.\n\
         Use a column number (e.g. 3) or add one modifier:\n\
         [y]ear, [m]onth, [d]ay, [H]our, [M]inute, [S]econd\n\
         Examples: 3, m3, 3m, H3, M3, y3, d3"
    );
    (None, None)
}

fn column_index(digits: &str) -> Option<usize> {
    let n: usize = digits.parse().ok()?;
    (1..1000).contains(&n).then_some(n)
}

/// `m3` / `3m` style spec: exactly one unit letter at the head or tail of
/// the digits.
fn modifier_form(s: &str) -> Option<(usize, Unit)> {
    let first = s.chars().next()?;
    let (unit, digits) = if let Some(unit) = Unit::from_letter(first) {
        (unit, &s[first.len_utf8()..])
    } else {
        let last = s.chars().last()?;
        let unit = Unit::from_letter(last)?;
        (unit, &s[..s.len() - last.len_utf8()])
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    column_index(digits).map(|index| (index, unit))
}

fn period(v: Option<&str>) -> Option<String> {
    v.filter(|s| valid_period(s)).map(str::to_owned)
}

/// `space=` takes a single digit.
fn margin(v: Option<&str>) -> Option<usize> {
    let v = v?;
    let mut chars = v.chars();
    match (chars.next(), chars.next()) {
        (Some(d), None) => d.to_digit(10).map(|d| d as usize),
        _ => None,
    }
}
