//! Run-time configuration object + fluent builder.
//!
//! Every knob normalises softly: out-of-range inputs fall back to the
//! documented default instead of failing, so a chart is always produced.

use crate::core::constants::MIN_CHART_HEIGHT;
use crate::core::timestamp::Unit;

/// Immutable parameters handed to ingest and the renderer.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart body height in text rows, at least [`MIN_CHART_HEIGHT`].
    pub height: usize,
    /// Explicit chart width in braille cells; `None` fits the terminal.
    pub width: Option<usize>,
    /// Plot every value of a group instead of the group mean.
    pub multi: bool,
    pub show_legend: bool,
    /// Custom header; `None` shows the stats line, `Some("")` nothing.
    pub title: Option<String>,
    /// Upper clamp for incoming values and the y-axis.
    pub top: Option<f64>,
    /// Lower clamp for incoming values and the y-axis.
    pub bottom: Option<f64>,
    /// Multiplier from the decimal-shift option (`10^shift`).
    pub scale: f64,
    /// Constant added to every value before scaling.
    pub offset: f64,
    /// Thousands separator stripped from numeric candidates.
    pub separator: Option<char>,
    /// 1-based field index holding the numeric value.
    pub column: Option<usize>,
    /// Summation resolution requested via the column spec.
    pub sum_unit: Option<Unit>,
    pub target: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Blank cells required after an x-axis label.
    pub label_margin: usize,
    pub debug: bool,
    /// Terminal width probed once at startup.
    pub term_cols: usize,
}

impl ChartConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Any period filter configured?
    #[must_use]
    pub fn filtered(&self) -> bool {
        self.target.is_some() || self.from.is_some() || self.to.is_some()
    }
}

/// Fluent builder accepting the raw CLI values.
#[derive(Debug)]
pub struct ConfigBuilder {
    height: i32,
    width: Option<i32>,
    multi: bool,
    show_legend: bool,
    title: Option<String>,
    top: Option<f64>,
    bottom: Option<f64>,
    shift: Option<i32>,
    offset: f64,
    separator: Option<char>,
    column: Option<usize>,
    sum_unit: Option<Unit>,
    target: Option<String>,
    from: Option<String>,
    to: Option<String>,
    label_margin: Option<usize>,
    debug: bool,
    term_cols: usize,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            height: 7,
            width: None,
            multi: false,
            show_legend: true,
            title: None,
            top: None,
            bottom: None,
            shift: None,
            offset: 0.0,
            separator: None,
            column: None,
            sum_unit: None,
            target: None,
            from: None,
            to: None,
            label_margin: None,
            debug: false,
            term_cols: 80,
        }
    }
}

impl ConfigBuilder {
    #[inline]
    pub fn height(mut self, rows: i32) -> Self {
        self.height = rows;
        self
    }
    #[inline]
    pub fn width(mut self, cells: Option<i32>) -> Self {
        self.width = cells;
        self
    }
    #[inline]
    pub fn multi(mut self, on: bool) -> Self {
        self.multi = on;
        self
    }
    #[inline]
    pub fn legend(mut self, on: bool) -> Self {
        self.show_legend = on;
        self
    }
    #[inline]
    pub fn title(mut self, t: Option<String>) -> Self {
        self.title = t;
        self
    }
    #[inline]
    pub fn top(mut self, v: Option<f64>) -> Self {
        self.top = v;
        self
    }
    #[inline]
    pub fn bottom(mut self, v: Option<f64>) -> Self {
        self.bottom = v;
        self
    }
    #[inline]
    pub fn shift(mut self, decimals: Option<i32>) -> Self {
        self.shift = decimals;
        self
    }
    #[inline]
    pub fn offset(mut self, v: f64) -> Self {
        self.offset = v;
        self
    }
    #[inline]
    pub fn separator(mut self, c: Option<char>) -> Self {
        self.separator = c;
        self
    }
    #[inline]
    pub fn column(mut self, index: Option<usize>) -> Self {
        self.column = index;
        self
    }
    #[inline]
    pub fn sum_unit(mut self, unit: Option<Unit>) -> Self {
        self.sum_unit = unit;
        self
    }
    #[inline]
    pub fn target(mut self, t: Option<String>) -> Self {
        self.target = t;
        self
    }
    #[inline]
    pub fn from(mut self, t: Option<String>) -> Self {
        self.from = t;
        self
    }
    #[inline]
    pub fn to(mut self, t: Option<String>) -> Self {
        self.to = t;
        self
    }
    #[inline]
    pub fn label_margin(mut self, cells: Option<usize>) -> Self {
        self.label_margin = cells;
        self
    }
    #[inline]
    pub fn debug(mut self, on: bool) -> Self {
        self.debug = on;
        self
    }
    #[inline]
    pub fn term_cols(mut self, cols: usize) -> Self {
        self.term_cols = cols;
        self
    }

    #[must_use]
    pub fn build(self) -> ChartConfig {
        let height = usize::try_from(self.height)
            .unwrap_or(MIN_CHART_HEIGHT)
            .max(MIN_CHART_HEIGHT);
        let width = self
            .width
            .and_then(|w| usize::try_from(w).ok())
            .filter(|w| *w > 0);
        let scale = match self.shift {
            Some(s) if s != 0 && (-15..=15).contains(&s) => 10_f64.powi(s),
            _ => 1.0,
        };
        // Contradictory clamps cancel each other.
        let (top, bottom) = match (self.top, self.bottom) {
            (Some(t), Some(b)) if t <= b => (None, None),
            pair => pair,
        };
        let title = self
            .title
            .map(|t| t.replace("\\n", "\n").replace("\\t", "\t"));
        ChartConfig {
            height,
            width,
            multi: self.multi,
            show_legend: self.show_legend,
            title,
            top,
            bottom,
            scale,
            offset: self.offset,
            separator: self.separator,
            column: self.column.filter(|c| *c > 0),
            sum_unit: self.sum_unit,
            target: self.target,
            from: self.from,
            to: self.to,
            label_margin: self.label_margin.unwrap_or(2),
            debug: self.debug,
            term_cols: self.term_cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_clamps_to_minimum() {
        assert_eq!(ChartConfig::builder().height(0).build().height, 2);
        assert_eq!(ChartConfig::builder().height(-3).build().height, 2);
        assert_eq!(ChartConfig::builder().height(40).build().height, 40);
    }

    #[test]
    fn width_ignores_nonpositive() {
        assert_eq!(ChartConfig::builder().width(Some(0)).build().width, None);
        assert_eq!(ChartConfig::builder().width(Some(-5)).build().width, None);
        assert_eq!(ChartConfig::builder().width(Some(72)).build().width, Some(72));
    }

    #[test]
    fn shift_range_guards_scale() {
        assert!((ChartConfig::builder().shift(Some(3)).build().scale - 1000.0).abs() < 1e-9);
        assert!((ChartConfig::builder().shift(Some(-3)).build().scale - 0.001).abs() < 1e-12);
        assert!((ChartConfig::builder().shift(Some(16)).build().scale - 1.0).abs() < f64::EPSILON);
        assert!((ChartConfig::builder().shift(Some(0)).build().scale - 1.0).abs() < f64::EPSILON);
        assert!((ChartConfig::builder().shift(None).build().scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn crossed_clamps_cancel() {
        let cfg = ChartConfig::builder()
            .top(Some(1.0))
            .bottom(Some(5.0))
            .build();
        assert_eq!(cfg.top, None);
        assert_eq!(cfg.bottom, None);

        let kept = ChartConfig::builder()
            .top(Some(5.0))
            .bottom(Some(1.0))
            .build();
        assert_eq!(kept.top, Some(5.0));
        assert_eq!(kept.bottom, Some(1.0));
    }

    #[test]
    fn title_unescapes_breaks_and_tabs() {
        let cfg = ChartConfig::builder()
            .title(Some("up\\ndown\\tover".into()))
            .build();
        assert_eq!(cfg.title.as_deref(), Some("up\ndown\tover"));
    }
}
