//! Per-pair statistic records.
//!
//! A `StatisticVector` is a fixed-layout row of numeric fields describing one
//! pair over one window. The layout is positional and consumed positionally by
//! the screen and by feature scaling, so the field order here is load-bearing:
//! single-series statistics for both symbols first, then the pair-level
//! statistics, then (optionally) one trailing label appended by the caller.

use serde::{Deserialize, Serialize};

/// Canonical field positions within a [`StatisticVector`].
pub mod field {
    pub const VARIATION_A: usize = 0;
    pub const VARIATION_B: usize = 1;
    pub const GAIN_VS_AVG_A: usize = 2;
    pub const GAIN_VS_AVG_B: usize = 3;
    pub const CORRELATION: usize = 4;
    pub const COINTEGRATION: usize = 5;
    pub const MEAN_PRICE_RATIO: usize = 6;
    pub const STD_PRICE_RATIO: usize = 7;
    pub const CURRENT_PRICE_RATIO: usize = 8;

    /// Width of the canonical layout without a label.
    pub const WIDTH: usize = 9;
}

/// Fixed-order numeric feature row for one (pair, window).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticVector {
    values: Vec<f64>,
}

impl StatisticVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Field accessor; positions past the end read as NaN so that a short or
    /// custom row fails every screen comparison instead of panicking.
    pub fn get(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(f64::NAN)
    }

    pub fn gain_vs_avg_a(&self) -> f64 {
        self.get(field::GAIN_VS_AVG_A)
    }

    pub fn gain_vs_avg_b(&self) -> f64 {
        self.get(field::GAIN_VS_AVG_B)
    }

    pub fn correlation(&self) -> f64 {
        self.get(field::CORRELATION)
    }

    pub fn cointegration(&self) -> f64 {
        self.get(field::COINTEGRATION)
    }

    pub fn mean_price_ratio(&self) -> f64 {
        self.get(field::MEAN_PRICE_RATIO)
    }

    pub fn std_price_ratio(&self) -> f64 {
        self.get(field::STD_PRICE_RATIO)
    }

    pub fn current_price_ratio(&self) -> f64 {
        self.get(field::CURRENT_PRICE_RATIO)
    }

    /// The trailing label, if the row is wider than the canonical feature
    /// layout (the label is always appended last so scaling can exclude it).
    pub fn label(&self) -> Option<f64> {
        if self.values.len() > field::WIDTH {
            self.values.last().copied()
        } else {
            None
        }
    }

    /// Split into feature fields and the trailing label field.
    pub fn split_label(&self) -> (&[f64], f64) {
        match self.values.split_last() {
            Some((label, features)) => (features, *label),
            None => (&[], f64::NAN),
        }
    }
}

impl From<Vec<f64>> for StatisticVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// One enumerated pair: the two symbols plus their statistic row for a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub symbol_a: String,
    pub symbol_b: String,
    pub stats: StatisticVector,
}

impl PairRecord {
    pub fn new(symbol_a: impl Into<String>, symbol_b: impl Into<String>, stats: StatisticVector) -> Self {
        Self {
            symbol_a: symbol_a.into(),
            symbol_b: symbol_b.into(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_row() -> Vec<f64> {
        vec![0.1, 0.2, 0.03, -0.05, 0.8, 0.95, 2.0, 0.1, 2.3]
    }

    #[test]
    fn test_field_accessors() {
        let sv = StatisticVector::new(canonical_row());
        assert_eq!(sv.gain_vs_avg_a(), 0.03);
        assert_eq!(sv.gain_vs_avg_b(), -0.05);
        assert_eq!(sv.correlation(), 0.8);
        assert_eq!(sv.cointegration(), 0.95);
        assert_eq!(sv.mean_price_ratio(), 2.0);
        assert_eq!(sv.std_price_ratio(), 0.1);
        assert_eq!(sv.current_price_ratio(), 2.3);
    }

    #[test]
    fn test_label_only_present_past_canonical_width() {
        let unlabeled = StatisticVector::new(canonical_row());
        assert_eq!(unlabeled.label(), None);

        let mut row = canonical_row();
        row.push(1.0);
        let labeled = StatisticVector::new(row);
        assert_eq!(labeled.label(), Some(1.0));

        let (features, label) = labeled.split_label();
        assert_eq!(features.len(), field::WIDTH);
        assert_eq!(label, 1.0);
    }

    #[test]
    fn test_short_row_reads_nan() {
        let sv = StatisticVector::new(vec![0.1, 0.2]);
        assert!(sv.correlation().is_nan());
        assert!(sv.current_price_ratio().is_nan());
    }
}
