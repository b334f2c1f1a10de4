//! Time-stepped backtest over historical windows.
//!
//! Simulated time advances by *decreasing* series index, per the newest-first
//! ordering convention: the loop starts at the oldest step (`start_time`) and
//! walks toward the present. Each step enumerates and screens all pairs,
//! asks the predictor which survivors to trade, and books a synthetic
//! equal-weighted long/short trade that the exit oracle closes.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backtest::{BacktestError, BacktestReport};
use crate::classify::ExitOracle;
use crate::dataset::StandardScaler;
use crate::domain::{MarketData, StatisticVector, TradeRecord};
use crate::screening::{enumerate_pairs, ScreenConfig, DEFAULT_MIN_HISTORY};
use crate::stats::single::gain_vs_average;
use crate::stats::{
    default_pair_statistics, default_series_statistics, PairStatistic, SeriesStatistic,
};

/// Decides whether to open a trade for a screened pair. Implemented for any
/// closure over the statistic row.
pub trait Predictor {
    fn predict(&self, stats: &StatisticVector) -> bool;
}

impl<F> Predictor for F
where
    F: Fn(&StatisticVector) -> bool,
{
    fn predict(&self, stats: &StatisticVector) -> bool {
        self(stats)
    }
}

/// Opens a trade for every pair that survives the screen. The baseline
/// strategy: the screen *is* the signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenOnly;

impl Predictor for ScreenOnly {
    fn predict(&self, _stats: &StatisticVector) -> bool {
        true
    }
}

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Series index of the first (oldest) simulation step.
    pub start_time: usize,
    /// Number of steps to simulate.
    pub steps: usize,
    /// Days between steps; also the statistic window length per step.
    pub step_size: usize,
    /// Maximum days a trade may be held before forced exit.
    pub hold_time: usize,
    /// Minimum history a symbol needs to be enumerated.
    pub min_history: usize,
    /// Fit a fresh feature scaler on each step's screened rows.
    pub scale: bool,
    pub screen: ScreenConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            start_time: 380,
            steps: 5,
            step_size: 20,
            hold_time: 30,
            min_history: DEFAULT_MIN_HISTORY,
            scale: true,
            screen: ScreenConfig::default(),
        }
    }
}

impl BacktestConfig {
    pub fn validate(&self) -> Result<(), BacktestError> {
        if self.steps == 0 {
            return Err(BacktestError::InvalidConfig("steps must be at least 1".into()));
        }
        if self.step_size == 0 {
            return Err(BacktestError::InvalidConfig("step_size must be at least 1".into()));
        }
        let span = (self.steps - 1) * self.step_size;
        if self.start_time < span {
            return Err(BacktestError::InvalidConfig(format!(
                "start_time ({}) is too small for {} steps of {} days",
                self.start_time, self.steps, self.step_size
            )));
        }
        Ok(())
    }
}

/// Drives the step loop and books trades.
pub struct Simulator {
    config: BacktestConfig,
    exit: Box<dyn ExitOracle>,
}

impl Simulator {
    pub fn new(config: BacktestConfig, exit: Box<dyn ExitOracle>) -> Self {
        Self { config, exit }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run the full simulation and return the ordered trade list.
    pub fn run(
        &self,
        data: &MarketData,
        predictor: &dyn Predictor,
    ) -> Result<BacktestReport, BacktestError> {
        self.config.validate()?;

        let singles = default_series_statistics();
        let pairs = default_pair_statistics();
        let single_refs: Vec<&dyn SeriesStatistic> = singles.iter().map(AsRef::as_ref).collect();
        let pair_refs: Vec<&dyn PairStatistic> = pairs.iter().map(AsRef::as_ref).collect();

        let mut trades = Vec::new();
        for step in 0..self.config.steps {
            let t = self.config.start_time - step * self.config.step_size;

            let records = enumerate_pairs(
                data,
                &pair_refs,
                &single_refs,
                self.config.step_size,
                t,
                self.config.min_history,
            );
            let mut survivors = self.config.screen.apply(records);
            debug!(step, t, survivors = survivors.len(), "screened");

            // Scaler state never crosses steps: fit fresh on this window only
            if self.config.scale && !survivors.is_empty() {
                let rows: Vec<&[f64]> = survivors.iter().map(|r| r.stats.as_slice()).collect();
                let scaler = StandardScaler::fit(&rows)?;
                for record in &mut survivors {
                    scaler.transform(record.stats.as_mut_slice());
                }
            }

            for record in &survivors {
                if !predictor.predict(&record.stats) {
                    continue;
                }
                if let Some(trade) = self.open_trade(data, record, t) {
                    debug!(%trade, "booked");
                    trades.push(trade);
                }
            }
        }

        info!(trades = trades.len(), "backtest complete");
        Ok(BacktestReport::new(trades))
    }

    /// Book one synthetic trade entered at `t`, closed where the exit oracle
    /// locates the reversion (or the hold-time boundary).
    fn open_trade(
        &self,
        data: &MarketData,
        record: &crate::domain::PairRecord,
        t: usize,
    ) -> Option<TradeRecord> {
        let a = data.get(&record.symbol_a)?;
        let b = data.get(&record.symbol_b)?;
        let n = self.config.step_size;

        let exit = self
            .exit
            .exit_index(a, b, n, t)
            .max(t.saturating_sub(self.config.hold_time));

        // Same designation rule the statistics and exit oracle use
        let (short, long) = if gain_vs_average(a, n, t) > gain_vs_average(b, n, t) {
            (a, b)
        } else {
            (b, a)
        };

        let long_roi = (long.close(exit) - long.close(t)) / long.close(t);
        let short_roi = (short.close(t) - short.close(exit)) / short.close(t);

        Some(TradeRecord {
            avg_roi: (long_roi + short_roi) / 2.0,
            hold_duration: t - exit,
            entry_time: t,
            symbol_a: record.symbol_a.clone(),
            symbol_b: record.symbol_b.clone(),
        })
    }
}
