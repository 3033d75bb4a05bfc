//! A collection of constants.

/// First scalar of the Unicode braille block; a dot mask added to it yields the glyph.
pub const BRAILLE_BASE: u32 = 0x2800;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Charts shorter than this are unreadable.
pub const MIN_CHART_HEIGHT: usize = 2;
/// X-axis labels need at least this many braille cells to be worth drawing.
pub const MIN_LABEL_CELLS: usize = 10;

/// Rows of accepted values the time-field search may inspect before giving up.
pub const DETECT_ATTEMPTS: usize = 10;
/// Granularity housekeeping (prune + re-validation) runs every this many values.
pub const PRUNE_INTERVAL: usize = 5;
/// Deactivated granularity categories get a fresh start every this many values.
pub const REVIVE_INTERVAL: usize = 100;

/// Fallback width when the terminal cannot be probed.
pub const FALLBACK_COLUMNS: usize = 80;

/// Parse-error line numbers kept for the diagnostics dump.
pub const KEPT_ERROR_LINES: usize = 4;
