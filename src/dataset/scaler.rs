//! Zero-mean, unit-variance feature scaling.

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetError;

/// Column-wise standardizer: fit once on a feature matrix, then transform
/// rows in place. A zero-variance column scales by 1.0 so constant features
/// pass through centered instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit over all rows. Every row must have the same width.
    pub fn fit(rows: &[&[f64]]) -> Result<Self, DatasetError> {
        let Some(first) = rows.first() else {
            return Err(DatasetError::Empty);
        };
        let width = first.len();
        for row in rows {
            if row.len() != width {
                return Err(DatasetError::RaggedRow {
                    expected: width,
                    got: row.len(),
                });
            }
        }

        let count = rows.len() as f64;
        let mut means = vec![0.0; width];
        for row in rows {
            for (mean, &value) in means.iter_mut().zip(*row) {
                *mean += value;
            }
        }
        for mean in &mut means {
            *mean /= count;
        }

        let mut scales = vec![0.0; width];
        for row in rows {
            for ((scale, mean), &value) in scales.iter_mut().zip(&means).zip(*row) {
                let diff = value - mean;
                *scale += diff * diff;
            }
        }
        for scale in &mut scales {
            *scale = (*scale / count).sqrt();
            if *scale == 0.0 {
                *scale = 1.0;
            }
        }

        Ok(Self { means, scales })
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }

    /// Standardize a row in place. Only the first `width` fields are touched,
    /// so a trailing label survives untransformed.
    pub fn transform(&self, row: &mut [f64]) {
        for ((value, mean), scale) in row.iter_mut().zip(&self.means).zip(&self.scales) {
            *value = (*value - mean) / scale;
        }
    }

    /// Undo [`transform`](Self::transform) on a row in place.
    pub fn inverse_transform(&self, row: &mut [f64]) {
        for ((value, mean), scale) in row.iter_mut().zip(&self.means).zip(&self.scales) {
            *value = *value * scale + mean;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn matrix() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 100.0, -3.0],
            vec![2.0, 200.0, 0.0],
            vec![3.0, 300.0, 3.0],
            vec![4.0, 400.0, 6.0],
        ]
    }

    fn fit(rows: &[Vec<f64>]) -> StandardScaler {
        let borrowed: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
        StandardScaler::fit(&borrowed).unwrap()
    }

    #[test]
    fn test_transformed_columns_are_standardized() {
        let rows = matrix();
        let scaler = fit(&rows);

        let mut transformed = rows.clone();
        for row in &mut transformed {
            scaler.transform(row);
        }

        for col in 0..3 {
            let column: Vec<f64> = transformed.iter().map(|r| r[col]).collect();
            let mean = column.iter().sum::<f64>() / column.len() as f64;
            let var =
                column.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / column.len() as f64;
            assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
            assert_relative_eq!(var, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_round_trip_recovers_original() {
        let rows = matrix();
        let scaler = fit(&rows);

        for original in &rows {
            let mut row = original.clone();
            scaler.transform(&mut row);
            scaler.inverse_transform(&mut row);
            for (restored, expected) in row.iter().zip(original) {
                assert_relative_eq!(restored, expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_constant_column_passes_through_centered() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let scaler = fit(&rows);

        let mut row = vec![5.0, 2.0];
        scaler.transform(&mut row);
        assert_relative_eq!(row[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_rejects_empty_and_ragged() {
        assert!(matches!(
            StandardScaler::fit(&[]),
            Err(DatasetError::Empty)
        ));

        let a = [1.0, 2.0];
        let b = [1.0];
        assert!(matches!(
            StandardScaler::fit(&[&a[..], &b[..]]),
            Err(DatasetError::RaggedRow { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_transform_leaves_trailing_label_untouched() {
        let rows = matrix();
        let scaler = fit(&rows);

        // Row carries one extra trailing label field beyond the fitted width
        let mut row = vec![2.0, 200.0, 0.0, 1.0];
        scaler.transform(&mut row);
        assert_eq!(row[3], 1.0);
    }
}
