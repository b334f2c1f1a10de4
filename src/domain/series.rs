//! Daily price history for a single symbol.
//!
//! Ordering convention used throughout the crate: index 0 is the most recent
//! trading day and increasing indices move backward into the past. All window
//! arithmetic (`offset`, `offset + n`, `offset - n`) relies on this.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// All loaded symbols, keyed by ticker. BTreeMap keeps enumeration order
/// deterministic across runs.
pub type MarketData = BTreeMap<String, TimeSeries>;

/// One trading day for one symbol.
///
/// A source line that failed to parse is kept as an invalid sentinel:
/// `date` is `None` and every numeric field is NaN, so any statistic that
/// touches it produces NaN instead of a fabricated price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub date: Option<String>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub adj_close: f64,
}

impl Datapoint {
    /// Parse a CSV line of the form `date,open,high,low,close,volume,adj_close`.
    ///
    /// Any malformed line (wrong field count, non-numeric value) yields the
    /// invalid sentinel rather than an error, matching how raw vendor files
    /// are ingested: bad rows poison statistics instead of aborting a load.
    pub fn parse_line(line: &str) -> Self {
        let fields: Vec<&str> = line.trim_end().split(',').collect();
        if fields.len() != 7 {
            return Self::invalid();
        }

        let mut values = [0.0f64; 6];
        for (slot, raw) in values.iter_mut().zip(&fields[1..]) {
            match raw.parse::<f64>() {
                Ok(v) => *slot = v,
                Err(_) => return Self::invalid(),
            }
        }

        Self {
            date: Some(fields[0].to_string()),
            open: values[0],
            high: values[1],
            low: values[2],
            close: values[3],
            volume: values[4],
            adj_close: values[5],
        }
    }

    /// The sentinel for a malformed source record.
    pub fn invalid() -> Self {
        Self {
            date: None,
            open: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            close: f64::NAN,
            volume: f64::NAN,
            adj_close: f64::NAN,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.date.is_some()
    }
}

/// Ordered daily history for one symbol, newest first.
///
/// Constructed once from external data and immutable afterwards. The close
/// vector is derived up front since close is the only field the statistics
/// consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    symbol: String,
    points: Vec<Datapoint>,
    closes: Vec<f64>,
}

impl TimeSeries {
    /// Build a series from datapoints ordered newest-first.
    pub fn new(symbol: impl Into<String>, points: Vec<Datapoint>) -> Self {
        let closes = points.iter().map(|p| p.close).collect();
        Self {
            symbol: symbol.into(),
            points,
            closes,
        }
    }

    /// Convenience constructor for tests and synthetic data: closes only,
    /// newest first, every point valid.
    pub fn from_closes(symbol: impl Into<String>, closes: Vec<f64>) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Datapoint {
                date: Some(format!("t-{i}")),
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
                adj_close: close,
            })
            .collect();
        Self {
            symbol: symbol.into(),
            points,
            closes,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Datapoint] {
        &self.points
    }

    /// Close price at `index`, NaN when the index is out of range. Reading
    /// past the end therefore poisons the statistic that did it instead of
    /// panicking, and the screen drops the affected pair.
    pub fn close(&self, index: usize) -> f64 {
        self.closes.get(index).copied().unwrap_or(f64::NAN)
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// The close-price window `[offset, offset + len)`, or `None` when it
    /// would overrun the end of history.
    pub fn window(&self, offset: usize, len: usize) -> Option<&[f64]> {
        let end = offset.checked_add(len)?;
        self.closes.get(offset..end)
    }

    /// Number of malformed sentinel points carried in this series.
    pub fn invalid_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_valid()).count()
    }
}
