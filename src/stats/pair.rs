//! Two-series statistics: short/long designation, correlation, cointegration
//! and price-ratio measures.

use statrs::statistics::Statistics;

use crate::domain::TimeSeries;
use crate::stats::adf;
use crate::stats::single::gain_vs_average;

/// Correlation is measured over a lookback of `10 * n`, a deliberately longer
/// horizon than the screening window itself.
pub const CORRELATION_LOOKBACK_FACTOR: usize = 10;

/// Default lookback for the OLS fit feeding the cointegration test.
pub const DEFAULT_COINTEGRATION_PERIOD: usize = 90;

/// Default lookback for the mean/std price-ratio baseline. Long on purpose:
/// the ratio baseline should be stable relative to the screening window.
pub const DEFAULT_RATIO_LOOKBACK: usize = 400;

/// Designate the short and long side of a pair by comparing gain versus the
/// moving average over `(n, offset)`: the series that has run further above
/// its own trend is expected to fall back and is shorted.
///
/// Returns `(short, long)`. The designation depends only on the computed
/// values, not on argument order, so swapping `a` and `b` yields the same
/// sides.
pub fn short_long_split<'a>(
    a: &'a TimeSeries,
    b: &'a TimeSeries,
    n: usize,
    offset: usize,
) -> (&'a TimeSeries, &'a TimeSeries) {
    if gain_vs_average(a, n, offset) > gain_vs_average(b, n, offset) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pearson correlation of the two close series over
/// `[offset, offset + 10n)`. NaN when either window is unavailable or a
/// series is degenerate.
pub fn correlation(a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64 {
    let len = n * CORRELATION_LOOKBACK_FACTOR;
    let (Some(wa), Some(wb)) = (a.window(offset, len), b.window(offset, len)) else {
        return f64::NAN;
    };
    pearson(wa, wb)
}

/// Engle-Granger cointegration score over `[offset, offset + period)`: the
/// p-value of a Dickey-Fuller unit-root test on the residuals of regressing
/// `a` on `b`. Low p-value conventionally indicates stationary residuals.
pub fn cointegration(a: &TimeSeries, b: &TimeSeries, period: usize, offset: usize) -> f64 {
    let (Some(wa), Some(wb)) = (a.window(offset, period), b.window(offset, period)) else {
        return f64::NAN;
    };
    adf::engle_granger_pvalue(wa, wb)
}

/// Current price ratio `a.close[offset] / b.close[offset]`.
pub fn price_ratio(a: &TimeSeries, b: &TimeSeries, offset: usize) -> f64 {
    a.close(offset) / b.close(offset)
}

/// The ordered sequence of close-price ratios for `[offset, offset + period)`.
/// Indices past the end of either history contribute NaN entries, which then
/// poison the derived mean/std.
pub fn price_ratio_series(a: &TimeSeries, b: &TimeSeries, period: usize, offset: usize) -> Vec<f64> {
    (offset..offset + period)
        .map(|i| a.close(i) / b.close(i))
        .collect()
}

/// Mean of the price ratio over the long baseline window.
pub fn mean_price_ratio(a: &TimeSeries, b: &TimeSeries, period: usize, offset: usize) -> f64 {
    price_ratio_series(a, b, period, offset).iter().mean()
}

/// Sample standard deviation of the price ratio over the long baseline
/// window.
pub fn std_price_ratio(a: &TimeSeries, b: &TimeSeries, period: usize, offset: usize) -> f64 {
    price_ratio_series(a, b, period, offset).iter().std_dev()
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let n_f = n as f64;
    let mean_x = x[..n].iter().sum::<f64>() / n_f;
    let mean_y = y[..n].iter().sum::<f64>() / n_f;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    sxy / denom
}
