use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one simulated pair trade. Created by the simulator, immutable
/// and terminal: the backtest's output is the list of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Average of long-side and short-side ROI, as a fraction.
    pub avg_roi: f64,
    /// Days the trade was held (entry index minus exit index).
    pub hold_duration: usize,
    /// Series index at which the trade was opened.
    pub entry_time: usize,
    pub symbol_a: String,
    pub symbol_b: String,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.avg_roi > 0.0
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} t={} held {}d roi {:+.4}",
            self.symbol_a, self.symbol_b, self.entry_time, self.hold_duration, self.avg_roi
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_flag() {
        let record = TradeRecord {
            avg_roi: 0.012,
            hold_duration: 7,
            entry_time: 40,
            symbol_a: "AAA".to_string(),
            symbol_b: "BBB".to_string(),
        };
        assert!(record.is_winner());

        let loser = TradeRecord { avg_roi: -0.004, ..record };
        assert!(!loser.is_winner());
    }

    #[test]
    fn test_display() {
        let record = TradeRecord {
            avg_roi: 0.0125,
            hold_duration: 7,
            entry_time: 40,
            symbol_a: "AAA".to_string(),
            symbol_b: "BBB".to_string(),
        };
        let text = format!("{record}");
        assert!(text.contains("AAA/BBB"));
        assert!(text.contains("+0.0125"));
    }
}
