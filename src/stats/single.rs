//! Single-series statistics over a backward-looking window.
//!
//! Every function reads the window `[offset, offset + n)` of close prices,
//! where index 0 is the most recent day. Degenerate inputs (short history,
//! zero mean, malformed points) come back as NaN and are excluded downstream
//! by the screen's threshold comparisons.

use statrs::statistics::Statistics;

use crate::domain::TimeSeries;

/// Default lookback for the simple moving average. Deliberately longer than
/// the screening window so the average is a stable trend baseline.
pub const DEFAULT_SMA_PERIOD: usize = 90;

/// Coefficient of variation (population std over mean) of the close prices
/// in `[offset, offset + n)`. NaN when the window is unavailable or the mean
/// is zero.
pub fn variation(series: &TimeSeries, n: usize, offset: usize) -> f64 {
    let Some(window) = series.window(offset, n) else {
        return f64::NAN;
    };
    if window.is_empty() {
        return f64::NAN;
    }
    let mean = window.iter().mean();
    if mean == 0.0 {
        return f64::NAN;
    }
    window.iter().population_std_dev() / mean
}

/// Percentage gain of the close price over `[offset, offset + n]`:
/// `(close[offset] - close[offset + n]) / close[offset + n]`.
pub fn gain(series: &TimeSeries, n: usize, offset: usize) -> f64 {
    let past = series.close(offset + n);
    (series.close(offset) - past) / past
}

/// Simple moving average of close prices over `[offset, offset + period)`,
/// clipped to the end of history when the full window is not available.
pub fn moving_average(series: &TimeSeries, period: usize, offset: usize) -> f64 {
    if let Some(window) = series.window(offset, period) {
        return window.iter().mean();
    }
    match series.closes().get(offset..) {
        Some(rest) if !rest.is_empty() => rest.iter().mean(),
        _ => f64::NAN,
    }
}

/// Gain of the close at `offset` relative to the 90-day moving average at the
/// same offset. The window length `n` is accepted for signature uniformity
/// with the other statistics but does not enter the computation.
pub fn gain_vs_average(series: &TimeSeries, _n: usize, offset: usize) -> f64 {
    let sma = moving_average(series, DEFAULT_SMA_PERIOD, offset);
    (series.close(offset) - sma) / sma
}
