//! Historical simulation: walk a screening-plus-prediction pipeline backward
//! through time and book a trade for every surviving pair.

pub mod report;
pub mod simulator;

pub use report::BacktestReport;
pub use simulator::{BacktestConfig, Predictor, ScreenOnly, Simulator};

use thiserror::Error;

use crate::dataset::DatasetError;

#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("invalid backtest config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
