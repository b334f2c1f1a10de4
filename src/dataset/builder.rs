//! Labeled training-set assembly across multiple windows.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{LabelColumn, TradeLabeler};
use crate::dataset::{DatasetError, StandardScaler};
use crate::domain::{MarketData, StatisticVector};
use crate::screening::{enumerate_pairs, ScreenConfig, DEFAULT_MIN_HISTORY};
use crate::stats::{
    default_pair_statistics, default_series_statistics, PairStatistic, SeriesStatistic,
};

/// Parameters for dataset assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Number of non-overlapping windows to accumulate.
    pub windows: usize,
    /// Window length in trading days; also the stride between windows.
    pub n: usize,
    /// Offset of the most recent window. Must be at least `n` so labelers can
    /// read the realized outcome from `[offset - n, offset]`.
    pub initial_offset: usize,
    /// Minimum history a symbol needs to be enumerated.
    pub min_history: usize,
    /// Standardize features (never the label) after screening.
    pub scale: bool,
    pub screen: ScreenConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            windows: 20,
            n: 20,
            initial_offset: 80,
            min_history: DEFAULT_MIN_HISTORY,
            scale: true,
            screen: ScreenConfig::default(),
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.windows == 0 {
            return Err(DatasetError::InvalidConfig("windows must be at least 1".into()));
        }
        if self.n == 0 {
            return Err(DatasetError::InvalidConfig("window length must be at least 1".into()));
        }
        if self.initial_offset < self.n {
            return Err(DatasetError::InvalidConfig(format!(
                "initial_offset ({}) must be >= window length ({}) so labels can look forward",
                self.initial_offset, self.n
            )));
        }
        Ok(())
    }
}

/// The assembled dataset: fixed-width rows whose final field is the label,
/// ready for an external model-training consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub rows: Vec<StatisticVector>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature matrix (all fields but the trailing label).
    pub fn features(&self) -> Vec<&[f64]> {
        self.rows.iter().map(|row| row.split_label().0).collect()
    }

    /// Label column.
    pub fn labels(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.split_label().1).collect()
    }
}

/// Builds a labeled dataset by enumerating and screening pairs over
/// `windows` consecutive windows, labeling each with the configured
/// classifier.
pub struct TrainingSetBuilder {
    config: DatasetConfig,
    labeler: Box<dyn TradeLabeler>,
}

impl TrainingSetBuilder {
    pub fn new(config: DatasetConfig, labeler: Box<dyn TradeLabeler>) -> Self {
        Self { config, labeler }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Assemble the dataset: per window, enumerate all pairs with the label
    /// column appended, accumulate across windows, screen once, then
    /// optionally standardize the features (the label stays raw).
    pub fn build(&self, data: &MarketData) -> Result<TrainingSet, DatasetError> {
        self.config.validate()?;

        let singles = default_series_statistics();
        let pairs = default_pair_statistics();
        let single_refs: Vec<&dyn SeriesStatistic> = singles.iter().map(AsRef::as_ref).collect();
        let label_column = LabelColumn::new(self.labeler.as_ref());
        let mut pair_refs: Vec<&dyn PairStatistic> = pairs.iter().map(AsRef::as_ref).collect();
        pair_refs.push(&label_column);

        let mut records = Vec::new();
        for window in 0..self.config.windows {
            let offset = self.config.n * window + self.config.initial_offset;
            let mut window_records = enumerate_pairs(
                data,
                &pair_refs,
                &single_refs,
                self.config.n,
                offset,
                self.config.min_history,
            );
            debug!(window, offset, records = window_records.len(), "window enumerated");
            records.append(&mut window_records);
        }

        let screened = self.config.screen.apply(records);
        let mut rows: Vec<StatisticVector> = screened.into_iter().map(|r| r.stats).collect();

        if self.config.scale {
            if rows.is_empty() {
                warn!("no pairs survived the screen; skipping feature scaling");
            } else {
                let feature_rows: Vec<&[f64]> = rows.iter().map(|r| r.split_label().0).collect();
                let scaler = StandardScaler::fit(&feature_rows)?;
                for row in &mut rows {
                    scaler.transform(row.as_mut_slice());
                }
            }
        }

        Ok(TrainingSet { rows })
    }
}
