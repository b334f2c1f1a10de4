//! Trade outcome classification.
//!
//! Four interchangeable strategies decide whether a diverged pair reverted to
//! its historical relationship within a holding period. Each is pure and
//! stateless. Two short/long designation rules coexist on purpose:
//! [`BoundedRoi`] and [`WinningTrade`] compare plain percentage gain, while
//! [`MeanReversion`] (the system default) and [`RatioReversion`] compare gain
//! versus the moving average, matching the simulator. Unifying the two rules
//! would change historical backtest results, so both are kept as distinct
//! strategies.
//!
//! A [`TradeLabeler`] produces a dataset label; classifiers that can also
//! locate the reversion instant implement [`ExitOracle`] and double as the
//! simulator's exit logic.

pub mod reversion;
pub mod roi;

pub use reversion::{MeanReversion, RatioReversion};
pub use roi::{BoundedRoi, WinningTrade};

use crate::domain::TimeSeries;
use crate::stats::PairStatistic;

/// Default holding period, in trading days.
pub const DEFAULT_HOLD_TIME: usize = 30;

/// Labels a pair+window with a reversion outcome (continuous or binary).
pub trait TradeLabeler {
    fn name(&self) -> &'static str;

    /// The label for the trade entered at `offset` over window length `n`.
    /// Degenerate inputs label as NaN and are screened out downstream.
    fn label(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64;
}

/// Locates the exit instant for a trade entered at `offset`.
pub trait ExitOracle: TradeLabeler + std::fmt::Debug {
    /// The series index at which the position closes: the first index where
    /// the pair reverted, or the holding-period boundary if it never did.
    /// Always within `[offset - hold_time, offset]` (saturating at 0).
    fn exit_index(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> usize;
}

/// Adapter that plugs a labeler into a pair-statistic list, so enumeration
/// appends the label as the trailing field of each `StatisticVector`.
pub struct LabelColumn<'a> {
    labeler: &'a dyn TradeLabeler,
}

impl<'a> LabelColumn<'a> {
    pub fn new(labeler: &'a dyn TradeLabeler) -> Self {
        Self { labeler }
    }
}

impl PairStatistic for LabelColumn<'_> {
    fn name(&self) -> &'static str {
        self.labeler.name()
    }

    fn compute(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64 {
        self.labeler.label(a, b, n, offset)
    }
}
