//! End-to-end pipeline tests.
//!
//! Exercises the full flow on synthetic CSV data: directory loader ->
//! pair enumeration -> threshold screen -> training-set assembly ->
//! walk-backward simulation. All data is deterministic; no fixture file
//! leaves the tempdir.

use std::fs;
use std::path::Path;

use pairscan::adapters::CsvDirectory;
use pairscan::backtest::{BacktestConfig, ScreenOnly, Simulator};
use pairscan::classify::MeanReversion;
use pairscan::dataset::{DatasetConfig, TrainingSetBuilder};
use pairscan::domain::{field, MarketData};
use pairscan::ports::MarketDataSource;
use pairscan::screening::{enumerate_pairs, ScreenConfig};
use pairscan::stats::{default_pair_statistics, default_series_statistics};

// ============================================================================
// Fixtures
// ============================================================================

const HISTORY: usize = 1000;

/// Base close at index `i` (newest first): a slow sawtooth so windows carry
/// real variance.
fn base_close(i: usize) -> f64 {
    100.0 + (i % 40) as f64 * 0.5
}

/// Closes for the pair legs. `AAA` tracks the base, `BBB` tracks twice the
/// base, and at each entry index the pair diverges 12% in opposite
/// directions for six days (the entry day and the five days before it).
fn pair_closes(entries: &[usize]) -> (Vec<f64>, Vec<f64>) {
    let mut a: Vec<f64> = (0..HISTORY).map(base_close).collect();
    let mut b: Vec<f64> = (0..HISTORY).map(|i| 2.0 * base_close(i)).collect();
    for &entry in entries {
        for i in entry..entry + 6 {
            a[i] *= 1.12;
            b[i] *= 0.88;
        }
    }
    (a, b)
}

fn write_csv(dir: &Path, symbol: &str, closes: &[f64]) {
    let mut contents = String::new();
    for close in closes {
        contents.push_str(&format!(
            "2016-01-01,{c},{c},{c},{c},1000,{c}\n",
            c = close
        ));
    }
    fs::write(dir.join(format!("{symbol}.csv")), contents).unwrap();
}

/// Writes a three-symbol market to `dir`: the divergent pair plus an
/// uncorrelated noise series that should never survive the screen.
fn write_market(dir: &Path, entries: &[usize]) {
    let (a, b) = pair_closes(entries);
    write_csv(dir, "AAA", &a);
    write_csv(dir, "BBB", &b);

    let noise: Vec<f64> = (0..HISTORY)
        .map(|i| if i % 2 == 0 { 120.0 } else { 80.0 })
        .collect();
    write_csv(dir, "NSE", &noise);
}

fn load_market(dir: &Path) -> MarketData {
    CsvDirectory::new(dir).load().unwrap()
}

fn loose_screen() -> ScreenConfig {
    // The tests exercise plumbing, not economics
    ScreenConfig {
        min_correlation: 0.1,
        min_cointegration: -1.0,
        min_spread: 0.01,
        price_ratio_std: 0.5,
    }
}

// ============================================================================
// Loader -> enumeration -> screen
// ============================================================================

#[test]
fn test_csv_to_screened_pairs() {
    let dir = tempfile::tempdir().unwrap();
    write_market(dir.path(), &[40]);
    let data = load_market(dir.path());
    assert_eq!(data.len(), 3);

    let singles = default_series_statistics();
    let pairs = default_pair_statistics();
    let single_refs: Vec<_> = singles.iter().map(|s| s.as_ref()).collect();
    let pair_refs: Vec<_> = pairs.iter().map(|s| s.as_ref()).collect();

    let records = enumerate_pairs(&data, &pair_refs, &single_refs, 20, 40, 900);
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.stats.len(), field::WIDTH);
    }

    let surviving = loose_screen().apply(records);
    assert_eq!(surviving.len(), 1);
    assert_eq!(surviving[0].symbol_a, "AAA");
    assert_eq!(surviving[0].symbol_b, "BBB");
}

#[test]
fn test_malformed_rows_do_not_derail_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    write_market(dir.path(), &[40]);

    // Corrupt a row far outside every statistic window.
    let path = dir.path().join("AAA.csv");
    let mut lines: Vec<String> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    lines[950] = "not,a,row".to_string();
    fs::write(&path, lines.join("\n")).unwrap();

    let data = load_market(dir.path());
    assert_eq!(data["AAA"].invalid_count(), 1);

    let singles = default_series_statistics();
    let pairs = default_pair_statistics();
    let single_refs: Vec<_> = singles.iter().map(|s| s.as_ref()).collect();
    let pair_refs: Vec<_> = pairs.iter().map(|s| s.as_ref()).collect();

    let records = enumerate_pairs(&data, &pair_refs, &single_refs, 20, 40, 900);
    let surviving = loose_screen().apply(records);
    assert_eq!(surviving.len(), 1);
}

// ============================================================================
// Training-set assembly
// ============================================================================

#[test]
fn test_dataset_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    write_market(dir.path(), &[40, 60]);
    let data = load_market(dir.path());

    let config = DatasetConfig {
        windows: 2,
        n: 20,
        initial_offset: 40,
        min_history: 900,
        scale: true,
        screen: loose_screen(),
    };
    let builder = TrainingSetBuilder::new(config, Box::new(MeanReversion::default()));
    let training_set = builder.build(&data).unwrap();

    // Both diverged windows survive for the one real pair.
    assert_eq!(training_set.len(), 2);
    for row in &training_set.rows {
        assert_eq!(row.len(), field::WIDTH + 1);
    }
    // Labels are binary and sit outside the scaled feature block.
    for label in training_set.labels() {
        assert!(label == 0.0 || label == 1.0);
    }
}

// ============================================================================
// Walk-backward simulation
// ============================================================================

#[test]
fn test_backtest_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    write_market(dir.path(), &[40, 60, 80]);
    let data = load_market(dir.path());

    let config = BacktestConfig {
        start_time: 80,
        steps: 3,
        step_size: 20,
        hold_time: 10,
        min_history: 900,
        scale: true,
        screen: loose_screen(),
    };
    let simulator = Simulator::new(config, Box::new(MeanReversion::new(10)));
    let report = simulator.run(&data, &ScreenOnly).unwrap();

    assert_eq!(report.len(), 3);
    for (trade, expected_entry) in report.trades.iter().zip([80usize, 60, 40]) {
        assert_eq!(trade.entry_time, expected_entry);
        assert!(trade.hold_duration <= 10);
        assert!(trade.avg_roi.is_finite());
    }
    assert!(report.mean_hold() <= 10.0);
}
