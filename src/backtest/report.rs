//! Backtest result summary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::TradeRecord;

/// The full ordered trade list plus summary accessors. The raw trades stay
/// public for any external analysis the summaries don't cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub trades: Vec<TradeRecord>,
}

impl BacktestReport {
    pub fn new(trades: Vec<TradeRecord>) -> Self {
        Self { trades }
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Mean realized ROI across all trades; NaN when no trades were booked.
    pub fn mean_roi(&self) -> f64 {
        if self.trades.is_empty() {
            return f64::NAN;
        }
        self.trades.iter().map(|t| t.avg_roi).sum::<f64>() / self.trades.len() as f64
    }

    /// Fraction of trades with positive ROI; NaN when no trades were booked.
    pub fn win_rate(&self) -> f64 {
        if self.trades.is_empty() {
            return f64::NAN;
        }
        let winners = self.trades.iter().filter(|t| t.is_winner()).count();
        winners as f64 / self.trades.len() as f64
    }

    /// Mean holding period in days; NaN when no trades were booked.
    pub fn mean_hold(&self) -> f64 {
        if self.trades.is_empty() {
            return f64::NAN;
        }
        self.trades.iter().map(|t| t.hold_duration as f64).sum::<f64>() / self.trades.len() as f64
    }
}

impl fmt::Display for BacktestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no trades");
        }
        write!(
            f,
            "{} trades, mean roi {:+.4}, win rate {:.1}%, mean hold {:.1}d",
            self.len(),
            self.mean_roi(),
            self.win_rate() * 100.0,
            self.mean_hold()
        )
    }
}
