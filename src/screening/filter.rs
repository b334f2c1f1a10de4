//! Multi-criterion pair screen.
//!
//! Removes pairs that are statistically unpromising before labeling or
//! simulation. Every criterion is a plain threshold comparison, which makes
//! NaN statistics fail automatically: that silent exclusion is the designed
//! recovery path for degenerate inputs (zero variance, missing history,
//! malformed records), so the screen never raises.

use serde::{Deserialize, Serialize};

use crate::domain::{PairRecord, StatisticVector};

/// Screen thresholds. Defaults come from the strategy's research settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Minimum Pearson correlation between the legs.
    pub min_correlation: f64,
    /// Minimum cointegration statistic. Note the comparison direction: the
    /// statistic is an ADF p-value yet must *exceed* this threshold. The
    /// strategy's historical results were produced with this comparison;
    /// see DESIGN.md before changing.
    pub min_cointegration: f64,
    /// Minimum absolute spread between the two gain-vs-average values.
    pub min_spread: f64,
    /// Minimum deviation of the current price ratio from its long-horizon
    /// mean, in standard deviations.
    pub price_ratio_std: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            min_correlation: 0.5,
            min_cointegration: 0.9,
            min_spread: 0.04,
            price_ratio_std: 2.0,
        }
    }
}

impl ScreenConfig {
    /// True iff every criterion holds. Any NaN field compares false against
    /// its threshold and the record is dropped.
    pub fn passes(&self, stats: &StatisticVector) -> bool {
        let gva_a = stats.gain_vs_avg_a();
        let gva_b = stats.gain_vs_avg_b();

        // One leg diverged up and the other down relative to its own trend
        gva_a * gva_b < 0.0
            && stats.correlation() > self.min_correlation
            && stats.cointegration() > self.min_cointegration
            && (gva_a - gva_b).abs() > self.min_spread
            && (stats.current_price_ratio() - stats.mean_price_ratio()).abs()
                >= self.price_ratio_std * stats.std_price_ratio()
    }

    /// Drop every record that fails a criterion. Idempotent: screening an
    /// already-screened set returns it unchanged.
    pub fn apply(&self, mut records: Vec<PairRecord>) -> Vec<PairRecord> {
        records.retain(|record| self.passes(&record.stats));
        records
    }
}
