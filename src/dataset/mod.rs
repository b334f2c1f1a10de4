//! Dataset assembly for the external model-training consumer.

pub mod builder;
pub mod scaler;

pub use builder::{DatasetConfig, TrainingSet, TrainingSetBuilder};
pub use scaler::StandardScaler;

use thiserror::Error;

/// Dataset assembly and scaling errors.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset is empty")]
    Empty,
    #[error("ragged feature row: expected {expected} fields, got {got}")]
    RaggedRow { expected: usize, got: usize },
    #[error("invalid dataset configuration: {0}")]
    InvalidConfig(String),
}
