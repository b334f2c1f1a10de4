//! Windowed statistics over daily close prices.
//!
//! Free functions hold the math (`single`, `pair`, `adf`); the
//! [`SeriesStatistic`] and [`PairStatistic`] traits wrap them so enumeration
//! can be driven by pluggable statistic lists. The default lists reproduce the
//! canonical `StatisticVector` layout in `domain::pair::field`.

pub mod adf;
pub mod pair;
pub mod single;

pub use pair::DEFAULT_RATIO_LOOKBACK;

use crate::domain::TimeSeries;

/// A statistic computed from one series over the window `(n, offset)`.
pub trait SeriesStatistic {
    fn name(&self) -> &'static str;
    fn compute(&self, series: &TimeSeries, n: usize, offset: usize) -> f64;
}

/// A statistic computed from two series over the window `(n, offset)`.
pub trait PairStatistic {
    fn name(&self) -> &'static str;
    fn compute(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64;
}

/// Coefficient of variation of closes in the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct Variation;

impl SeriesStatistic for Variation {
    fn name(&self) -> &'static str {
        "variation"
    }

    fn compute(&self, series: &TimeSeries, n: usize, offset: usize) -> f64 {
        single::variation(series, n, offset)
    }
}

/// Plain percentage gain over the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gain;

impl SeriesStatistic for Gain {
    fn name(&self) -> &'static str {
        "gain"
    }

    fn compute(&self, series: &TimeSeries, n: usize, offset: usize) -> f64 {
        single::gain(series, n, offset)
    }
}

/// Gain of the current close versus the 90-day moving average.
#[derive(Debug, Clone, Copy, Default)]
pub struct GainVsAverage;

impl SeriesStatistic for GainVsAverage {
    fn name(&self) -> &'static str {
        "gain_vs_average"
    }

    fn compute(&self, series: &TimeSeries, n: usize, offset: usize) -> f64 {
        single::gain_vs_average(series, n, offset)
    }
}

/// Pearson correlation over a `10 * n` lookback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Correlation;

impl PairStatistic for Correlation {
    fn name(&self) -> &'static str {
        "correlation"
    }

    fn compute(&self, a: &TimeSeries, b: &TimeSeries, n: usize, offset: usize) -> f64 {
        pair::correlation(a, b, n, offset)
    }
}

/// Engle-Granger cointegration p-value over a fixed fit period, independent
/// of the screening window `n`.
#[derive(Debug, Clone, Copy)]
pub struct Cointegration {
    pub period: usize,
}

impl Default for Cointegration {
    fn default() -> Self {
        Self {
            period: pair::DEFAULT_COINTEGRATION_PERIOD,
        }
    }
}

impl PairStatistic for Cointegration {
    fn name(&self) -> &'static str {
        "cointegration"
    }

    fn compute(&self, a: &TimeSeries, b: &TimeSeries, _n: usize, offset: usize) -> f64 {
        pair::cointegration(a, b, self.period, offset)
    }
}

/// Mean close-price ratio over the long baseline lookback.
#[derive(Debug, Clone, Copy)]
pub struct MeanPriceRatio {
    pub lookback: usize,
}

impl Default for MeanPriceRatio {
    fn default() -> Self {
        Self {
            lookback: pair::DEFAULT_RATIO_LOOKBACK,
        }
    }
}

impl PairStatistic for MeanPriceRatio {
    fn name(&self) -> &'static str {
        "mean_price_ratio"
    }

    fn compute(&self, a: &TimeSeries, b: &TimeSeries, _n: usize, offset: usize) -> f64 {
        pair::mean_price_ratio(a, b, self.lookback, offset)
    }
}

/// Sample standard deviation of the close-price ratio over the long baseline
/// lookback.
#[derive(Debug, Clone, Copy)]
pub struct StdPriceRatio {
    pub lookback: usize,
}

impl Default for StdPriceRatio {
    fn default() -> Self {
        Self {
            lookback: pair::DEFAULT_RATIO_LOOKBACK,
        }
    }
}

impl PairStatistic for StdPriceRatio {
    fn name(&self) -> &'static str {
        "std_price_ratio"
    }

    fn compute(&self, a: &TimeSeries, b: &TimeSeries, _n: usize, offset: usize) -> f64 {
        pair::std_price_ratio(a, b, self.lookback, offset)
    }
}

/// Price ratio at the window's current day.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentPriceRatio;

impl PairStatistic for CurrentPriceRatio {
    fn name(&self) -> &'static str {
        "current_price_ratio"
    }

    fn compute(&self, a: &TimeSeries, b: &TimeSeries, _n: usize, offset: usize) -> f64 {
        pair::price_ratio(a, b, offset)
    }
}

/// The canonical single-series statistic list: variation then gain vs
/// average, applied to symbol A then symbol B by the enumerator.
pub fn default_series_statistics() -> Vec<Box<dyn SeriesStatistic>> {
    vec![Box::new(Variation), Box::new(GainVsAverage)]
}

/// The canonical pair statistic list, in `StatisticVector` field order.
pub fn default_pair_statistics() -> Vec<Box<dyn PairStatistic>> {
    vec![
        Box::new(Correlation),
        Box::new(Cointegration::default()),
        Box::new(MeanPriceRatio::default()),
        Box::new(StdPriceRatio::default()),
        Box::new(CurrentPriceRatio),
    ]
}
