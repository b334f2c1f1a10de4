//! Reversion detectors with dual label/index modes.
//!
//! Both strategies scan forward in simulated time (decreasing index) from the
//! entry day down to the holding-period boundary, looking for the first
//! instant the pair reverted. As labelers they answer "did it revert"
//! (1 or 0); as exit oracles they answer "when" (the index, or the boundary
//! when it never reverted).

use crate::classify::{ExitOracle, TradeLabeler, DEFAULT_HOLD_TIME};
use crate::domain::TimeSeries;
use crate::stats::pair::{mean_price_ratio, price_ratio, short_long_split, DEFAULT_RATIO_LOOKBACK};
use crate::stats::single::{moving_average, DEFAULT_SMA_PERIOD};

/// The system's default classifier: the pair has reverted at the first index
/// where the shorted leg closes below its own moving average while the long
/// leg closes above its own.
#[derive(Debug, Clone, Copy)]
pub struct MeanReversion {
    pub hold_time: usize,
}

impl Default for MeanReversion {
    fn default() -> Self {
        Self {
            hold_time: DEFAULT_HOLD_TIME,
        }
    }
}

impl MeanReversion {
    pub fn new(hold_time: usize) -> Self {
        Self { hold_time }
    }

    /// Scan `[offset - hold_time, offset]` (newest index last in time) and
    /// return the first reverted index, or the boundary with `false`.
    fn scan(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> (usize, bool) {
        let (short, long) = short_long_split(a, b, n, offset);

        // Averages are anchored at entry; the scan tests raw closes against them
        let short_sma = moving_average(short, DEFAULT_SMA_PERIOD, offset);
        let long_sma = moving_average(long, DEFAULT_SMA_PERIOD, offset);

        let lower = offset.saturating_sub(self.hold_time);
        for i in (lower..=offset).rev() {
            if short.close(i) < short_sma && long.close(i) > long_sma {
                return (i, true);
            }
        }
        (lower, false)
    }
}

impl TradeLabeler for MeanReversion {
    fn name(&self) -> &'static str {
        "mean_reversion"
    }

    fn label(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64 {
        if self.scan(a, b, n, offset).1 {
            1.0
        } else {
            0.0
        }
    }
}

impl ExitOracle for MeanReversion {
    fn exit_index(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> usize {
        self.scan(a, b, n, offset).0
    }
}

/// Reversion of the pair's price ratio through its long-horizon mean: the
/// sign of the ratio's deviation from the mean at entry determines which
/// direction counts as a crossing.
#[derive(Debug, Clone, Copy)]
pub struct RatioReversion {
    pub hold_time: usize,
    pub ratio_lookback: usize,
}

impl Default for RatioReversion {
    fn default() -> Self {
        Self {
            hold_time: DEFAULT_HOLD_TIME,
            ratio_lookback: DEFAULT_RATIO_LOOKBACK,
        }
    }
}

impl RatioReversion {
    pub fn new(hold_time: usize, ratio_lookback: usize) -> Self {
        Self {
            hold_time,
            ratio_lookback,
        }
    }

    fn scan(&self, a: &TimeSeries, b: &TimeSeries, _n: usize, offset: usize) -> (usize, bool) {
        let initial = price_ratio(a, b, offset);
        let mean = mean_price_ratio(a, b, self.ratio_lookback, offset);

        // Which side of the mean the ratio starts on
        let coeff = if initial > mean { 1.0 } else { -1.0 };

        let lower = offset.saturating_sub(self.hold_time);
        for i in (lower..=offset).rev() {
            // The denominator stays pinned at the entry day's close of `b`
            let ratio = a.close(i) / b.close(offset);
            if coeff * (ratio - mean) < 0.0 {
                return (i, true);
            }
        }
        (lower, false)
    }
}

impl TradeLabeler for RatioReversion {
    fn name(&self) -> &'static str {
        "ratio_reversion"
    }

    fn label(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64 {
        if self.scan(a, b, n, offset).1 {
            1.0
        } else {
            0.0
        }
    }
}

impl ExitOracle for RatioReversion {
    fn exit_index(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> usize {
        self.scan(a, b, n, offset).0
    }
}
