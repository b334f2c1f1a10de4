//! Exhaustive pair enumeration for one window.

use tracing::debug;

use crate::domain::{MarketData, PairRecord, StatisticVector};
use crate::stats::{PairStatistic, SeriesStatistic};

/// Minimum history (in datapoints) both legs of a pair must carry to be
/// enumerated. Long enough to cover the ratio baseline plus the deepest
/// backtest offset used in practice.
pub const DEFAULT_MIN_HISTORY: usize = 900;

/// Build every unordered symbol pair and its statistic row for the window
/// `(n, offset)`.
///
/// Each pair appears exactly once and never with itself; pairs where either
/// leg has fewer than `min_history` datapoints are silently excluded (a
/// filtering decision, not an error). For `k` eligible symbols the result has
/// exactly `k * (k - 1) / 2` records, in sorted-symbol order.
///
/// The statistic row is assembled positionally: each single-series statistic
/// applied to symbol A then symbol B, followed by each pair statistic applied
/// to (A, B). With the default lists this is the canonical layout of
/// `domain::pair::field`. The per-pair computations are independent of each
/// other; the loop body only reads series data.
pub fn enumerate_pairs(
    data: &MarketData,
    pair_stats: &[&dyn PairStatistic],
    series_stats: &[&dyn SeriesStatistic],
    n: usize,
    offset: usize,
    min_history: usize,
) -> Vec<PairRecord> {
    let eligible: Vec<(&String, &crate::domain::TimeSeries)> = data
        .iter()
        .filter(|(_, series)| series.len() >= min_history)
        .collect();

    debug!(
        symbols = data.len(),
        eligible = eligible.len(),
        n,
        offset,
        "enumerating pairs"
    );

    let mut records = Vec::with_capacity(eligible.len() * eligible.len().saturating_sub(1) / 2);
    for (i, (symbol_a, series_a)) in eligible.iter().enumerate() {
        for (symbol_b, series_b) in &eligible[i + 1..] {
            let mut values =
                Vec::with_capacity(series_stats.len() * 2 + pair_stats.len());
            for stat in series_stats {
                values.push(stat.compute(series_a, n, offset));
                values.push(stat.compute(series_b, n, offset));
            }
            for stat in pair_stats {
                values.push(stat.compute(series_a, series_b, n, offset));
            }
            records.push(PairRecord::new(
                symbol_a.as_str(),
                symbol_b.as_str(),
                StatisticVector::new(values),
            ));
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{field, TimeSeries};
    use crate::stats::{default_pair_statistics, default_series_statistics};

    fn market(symbols: &[(&str, usize)]) -> MarketData {
        symbols
            .iter()
            .map(|&(symbol, len)| {
                let closes = (0..len).map(|i| 100.0 + (i % 7) as f64).collect();
                (symbol.to_string(), TimeSeries::from_closes(symbol, closes))
            })
            .collect()
    }

    fn enumerate_defaults(data: &MarketData, min_history: usize) -> Vec<PairRecord> {
        let singles = default_series_statistics();
        let pairs = default_pair_statistics();
        let single_refs: Vec<&dyn crate::stats::SeriesStatistic> =
            singles.iter().map(AsRef::as_ref).collect();
        let pair_refs: Vec<&dyn crate::stats::PairStatistic> =
            pairs.iter().map(AsRef::as_ref).collect();
        enumerate_pairs(data, &pair_refs, &single_refs, 20, 0, min_history)
    }

    #[test]
    fn test_pair_count_and_uniqueness() {
        let data = market(&[("AAA", 500), ("BBB", 500), ("CCC", 500), ("DDD", 500)]);
        let records = enumerate_defaults(&data, 400);

        // k * (k - 1) / 2 for k = 4
        assert_eq!(records.len(), 6);

        let mut seen = std::collections::BTreeSet::new();
        for record in &records {
            assert_ne!(record.symbol_a, record.symbol_b);
            let key = if record.symbol_a < record.symbol_b {
                (record.symbol_a.clone(), record.symbol_b.clone())
            } else {
                (record.symbol_b.clone(), record.symbol_a.clone())
            };
            assert!(seen.insert(key), "duplicate unordered pair");
        }
    }

    #[test]
    fn test_short_history_symbols_silently_excluded() {
        let data = market(&[("AAA", 500), ("BBB", 500), ("SHORT", 100)]);
        let records = enumerate_defaults(&data, 400);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol_a, "AAA");
        assert_eq!(records[0].symbol_b, "BBB");
    }

    #[test]
    fn test_row_layout_width() {
        let data = market(&[("AAA", 500), ("BBB", 500)]);
        let records = enumerate_defaults(&data, 400);
        assert_eq!(records[0].stats.len(), field::WIDTH);
    }

    #[test]
    fn test_enumeration_order_is_deterministic() {
        let data = market(&[("ZZZ", 500), ("AAA", 500), ("MMM", 500)]);
        let records = enumerate_defaults(&data, 400);
        let names: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.symbol_a.as_str(), r.symbol_b.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![("AAA", "MMM"), ("AAA", "ZZZ"), ("MMM", "ZZZ")]
        );
    }
}
