//! Pairscan - Pairs-Trading Mean Reversion Screener
//!
//! Screens a universe of daily close series for correlated, cointegrated
//! pairs whose price ratio has diverged, labels historical windows with
//! reversion outcomes for model training, and simulates the strategy
//! backward through time.
//!
//! # Modules
//!
//! - `domain`: Core data types (Datapoint, TimeSeries, StatisticVector, TradeRecord)
//! - `stats`: Windowed single-series and pair statistics (gain, correlation, cointegration)
//! - `screening`: Pair enumeration and threshold filtering
//! - `classify`: Trade outcome labelers and exit rules
//! - `dataset`: Training-set assembly and feature scaling
//! - `backtest`: Walk-backward trade simulation
//! - `ports`: Trait abstractions (MarketDataSource)
//! - `adapters`: External implementations (CSV directory loader)
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod backtest;
pub mod classify;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod ports;
pub mod screening;
pub mod stats;
