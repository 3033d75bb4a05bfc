//! Summation of values into truncated-timestamp buckets.
//!
//! Keys keep first-seen order so a chronological stream stays chronological
//! in the chart; `IndexMap` gives that without a second pass.

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Buckets {
    /// Turned on at adoption when summation was requested; a format
    /// violation turns it off for good.
    pub enabled: bool,
    sums: IndexMap<String, f64>,
}

impl Buckets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: String, value: f64) {
        *self.sums.entry(key).or_insert(0.0) += value;
    }

    /// Drop everything collected so far and refuse further sums.
    pub fn discard(&mut self) {
        self.enabled = false;
        self.sums.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Bucket sums in first-seen key order.
    #[must_use]
    pub fn series(&self) -> Vec<f64> {
        self.sums.values().copied().collect()
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<&str> {
        self.sums.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_accumulate_in_first_seen_order() {
        let mut b = Buckets::new();
        b.add("2024-01".into(), 10.0);
        b.add("2024-02".into(), 1.0);
        b.add("2024-01".into(), 5.0);
        assert_eq!(b.keys(), ["2024-01", "2024-02"]);
        assert_eq!(b.series(), [15.0, 1.0]);
    }

    #[test]
    fn discard_clears_and_disables() {
        let mut b = Buckets::new();
        b.enabled = true;
        b.add("2024".into(), 1.0);
        b.discard();
        assert!(!b.enabled);
        assert!(b.is_empty());
    }
}
