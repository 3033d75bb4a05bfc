//! Folds an arbitrary-length series into at most `2 × cells` plottable
//! units, one unit per braille half-column.
//!
//! Three strategies:
//! * mean      - consecutive groups collapse to their arithmetic mean
//! * multi     - groups are kept whole, every member gets a dot
//! * precise   - multi with an explicit width: group boundaries are
//!   distributed by rounding so the unit count is exact regardless of
//!   divisibility

use crate::core::config::ChartConfig;
use crate::core::constants::BRAILLE_HORIZONTAL_RESOLUTION;

/// Per-unit payload, depending on the grouping strategy.
#[derive(Debug)]
pub enum Units {
    Mean(Vec<f64>),
    Multi(Vec<Vec<f64>>),
}

/// Compression output: the units plus the raw-index boundary that closed
/// each one. The X-axis locates its ticks against these boundaries.
#[derive(Debug)]
pub struct Compressed {
    pub units: Units,
    pub boundaries: Vec<usize>,
    pub factor: usize,
}

impl Compressed {
    #[must_use]
    pub fn unit_count(&self) -> usize {
        match &self.units {
            Units::Mean(v) => v.len(),
            Units::Multi(v) => v.len(),
        }
    }

    /// Values contributing to unit `index`; may be empty in precise mode.
    #[must_use]
    pub fn group(&self, index: usize) -> &[f64] {
        match &self.units {
            Units::Mean(v) => std::slice::from_ref(&v[index]),
            Units::Multi(v) => &v[index],
        }
    }

    /// Character cells needed to plot every unit.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.unit_count().div_ceil(2)
    }
}

/// Reduce `values` to fit `cells` character columns.
#[must_use]
pub fn compress(values: &[f64], cfg: &ChartConfig, cells: usize) -> Compressed {
    let max_units = cells * BRAILLE_HORIZONTAL_RESOLUTION;
    let factor = if values.len() > max_units {
        values.len().div_ceil(max_units)
    } else {
        1
    };

    if cfg.multi {
        match cfg.width {
            Some(width) => precise(values, width, factor),
            None => multi(values, factor),
        }
    } else {
        mean(values, factor)
    }
}

fn mean(values: &[f64], factor: usize) -> Compressed {
    let mut units = Vec::new();
    let mut boundaries = Vec::new();
    for (i, group) in values.chunks(factor).enumerate() {
        let sum: f64 = group.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        units.push(sum / group.len() as f64);
        boundaries.push((i + 1) * factor);
    }
    Compressed {
        units: Units::Mean(units),
        boundaries,
        factor,
    }
}

fn multi(values: &[f64], factor: usize) -> Compressed {
    let mut units = Vec::new();
    let mut boundaries = Vec::new();
    for (i, group) in values.chunks(factor).enumerate() {
        units.push(group.to_vec());
        boundaries.push((i + 1) * factor);
    }
    Compressed {
        units: Units::Multi(units),
        boundaries,
        factor,
    }
}

/// The explicit-width variant ignores the factor for grouping and rounds
/// `(i+1) × n / slots` to place each boundary, ties to even.
fn precise(values: &[f64], width: usize, factor: usize) -> Compressed {
    let slots = width * BRAILLE_HORIZONTAL_RESOLUTION;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let boundaries: Vec<usize> = (0..slots)
        .map(|i| (((i + 1) * values.len()) as f64 / slots as f64).round_ties_even() as usize)
        .collect();

    let mut units = Vec::with_capacity(slots);
    let mut start = 0;
    for &end in &boundaries {
        units.push(values[start..end].to_vec());
        start = end;
    }
    Compressed {
        units: Units::Multi(units),
        boundaries,
        factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<f64> {
        #[allow(clippy::cast_precision_loss)]
        (1..=n).map(|v| v as f64).collect()
    }

    #[test]
    fn small_series_is_passed_through() {
        let cfg = ChartConfig::builder().build();
        let out = compress(&series(3), &cfg, 63);
        assert_eq!(out.factor, 1);
        assert_eq!(out.unit_count(), 3);
        assert_eq!(out.cells(), 2);
        assert_eq!(out.group(1), [2.0]);
        assert_eq!(out.boundaries, [1, 2, 3]);
    }

    #[test]
    fn mean_mode_averages_each_group() {
        let cfg = ChartConfig::builder().build();
        let out = compress(&series(10), &cfg, 2);
        assert_eq!(out.factor, 3);
        assert_eq!(out.unit_count(), 4);
        match &out.units {
            Units::Mean(v) => assert_eq!(v, &[2.0, 5.0, 8.0, 10.0]),
            Units::Multi(_) => panic!("mean mode expected"),
        }
        // the last boundary may run past the input length
        assert_eq!(out.boundaries, [3, 6, 9, 12]);
    }

    #[test]
    fn multi_mode_keeps_every_group_member() {
        let cfg = ChartConfig::builder().multi(true).build();
        let out = compress(&series(10), &cfg, 2);
        assert_eq!(out.group(0), [1.0, 2.0, 3.0]);
        assert_eq!(out.group(3), [10.0]);
        assert_eq!(out.boundaries, [3, 6, 9, 12]);
    }

    #[test]
    fn precise_boundaries_round_ties_to_even() {
        let cfg = ChartConfig::builder().multi(true).width(Some(3)).build();
        let out = compress(&series(10), &cfg, 3);
        assert_eq!(out.boundaries, [2, 3, 5, 7, 8, 10]);
        let sizes: Vec<usize> = (0..out.unit_count()).map(|i| out.group(i).len()).collect();
        assert_eq!(sizes, [2, 1, 2, 2, 1, 2]);
    }

    #[test]
    fn precise_mode_tolerates_empty_slices() {
        let cfg = ChartConfig::builder().multi(true).width(Some(3)).build();
        let out = compress(&series(2), &cfg, 3);
        assert_eq!(out.unit_count(), 6);
        assert_eq!(out.boundaries, [0, 1, 1, 1, 2, 2]);
        assert!(out.group(0).is_empty());
        assert_eq!(out.group(1), [1.0]);
        assert_eq!(out.group(4), [2.0]);
    }

    #[test]
    fn unit_count_never_exceeds_capacity() {
        let cfg = ChartConfig::builder().build();
        for n in [1usize, 7, 63, 64, 400, 1000] {
            let out = compress(&series(n), &cfg, 20);
            assert!(out.unit_count() <= 40, "n={n}");
        }
    }
}
