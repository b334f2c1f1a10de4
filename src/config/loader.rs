//! Configuration loader.
//!
//! Loads and validates run parameters from TOML files matching config.toml.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::backtest::BacktestConfig;
use crate::classify::{
    BoundedRoi, ExitOracle, MeanReversion, RatioReversion, TradeLabeler, WinningTrade,
    DEFAULT_HOLD_TIME,
};
use crate::dataset::DatasetConfig;
use crate::screening::ScreenConfig;
use crate::stats::DEFAULT_RATIO_LOOKBACK;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataSection,
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub labeler: LabelerSection,
    pub dataset: DatasetSection,
    pub backtest: BacktestSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Market data location section
#[derive(Debug, Clone, Deserialize)]
pub struct DataSection {
    /// Directory of per-symbol CSV files (`<SYMBOL>.csv`, newest row first)
    pub dir: String,
}

/// Labeler selection section
#[derive(Debug, Clone, Deserialize)]
pub struct LabelerSection {
    /// One of "mean_reversion", "ratio_reversion", "bounded_roi",
    /// "winning_trade"
    pub name: String,
    /// Maximum days a trade may be held before forced exit
    #[serde(default = "default_hold_time")]
    pub hold_time: usize,
    /// Lookback for the ratio mean used by "ratio_reversion"
    #[serde(default = "default_ratio_lookback")]
    pub ratio_lookback: usize,
}

fn default_hold_time() -> usize {
    DEFAULT_HOLD_TIME
}

fn default_ratio_lookback() -> usize {
    DEFAULT_RATIO_LOOKBACK
}

impl Default for LabelerSection {
    fn default() -> Self {
        Self {
            name: "mean_reversion".to_string(),
            hold_time: DEFAULT_HOLD_TIME,
            ratio_lookback: DEFAULT_RATIO_LOOKBACK,
        }
    }
}

/// Training-set assembly section
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSection {
    /// Number of non-overlapping windows to accumulate
    pub windows: usize,
    /// Window length in trading days; also the stride between windows
    pub n: usize,
    /// Offset of the most recent window (must be at least `n`)
    pub initial_offset: usize,
    /// Minimum history a symbol needs to be enumerated
    pub min_history: usize,
    /// Standardize features (never the label) after screening
    pub scale: bool,
}

/// Historical simulation section
#[derive(Debug, Clone, Deserialize)]
pub struct BacktestSection {
    /// Series index of the first (oldest) simulation step
    pub start_time: usize,
    /// Number of steps to simulate
    pub steps: usize,
    /// Days between steps; also the statistic window length per step
    pub step_size: usize,
    /// Maximum days a trade may be held before forced exit
    pub hold_time: usize,
    /// Minimum history a symbol needs to be enumerated
    pub min_history: usize,
    /// Fit a fresh feature scaler on each step's screened rows
    pub scale: bool,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "data.dir cannot be empty".to_string(),
            ));
        }

        match self.labeler.name.as_str() {
            "mean_reversion" | "ratio_reversion" | "bounded_roi" | "winning_trade" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown labeler '{other}'"
                )));
            }
        }
        if self.labeler.hold_time == 0 {
            return Err(ConfigError::ValidationError(format!(
                "labeler.hold_time must be > 0, got {}",
                self.labeler.hold_time
            )));
        }

        DatasetConfig::from(self)
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        BacktestConfig::from(self)
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }

    /// Build the configured label column for training-set assembly.
    pub fn make_labeler(&self) -> Result<Box<dyn TradeLabeler>, ConfigError> {
        let section = &self.labeler;
        let labeler: Box<dyn TradeLabeler> = match section.name.as_str() {
            "mean_reversion" => Box::new(MeanReversion::new(section.hold_time)),
            "ratio_reversion" => Box::new(RatioReversion::new(
                section.hold_time,
                section.ratio_lookback,
            )),
            "bounded_roi" => Box::new(BoundedRoi),
            "winning_trade" => Box::new(WinningTrade),
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown labeler '{other}'"
                )));
            }
        };
        Ok(labeler)
    }

    /// Build the configured exit rule for the simulator. Only the reversion
    /// labelers carry an exit point; the ROI labelers are training-only.
    pub fn make_exit_oracle(&self) -> Result<Box<dyn ExitOracle>, ConfigError> {
        let section = &self.labeler;
        let oracle: Box<dyn ExitOracle> = match section.name.as_str() {
            "mean_reversion" => Box::new(MeanReversion::new(self.backtest.hold_time)),
            "ratio_reversion" => Box::new(RatioReversion::new(
                self.backtest.hold_time,
                section.ratio_lookback,
            )),
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "labeler '{other}' cannot drive a backtest exit"
                )));
            }
        };
        Ok(oracle)
    }
}

impl From<&Config> for DatasetConfig {
    fn from(config: &Config) -> Self {
        DatasetConfig {
            windows: config.dataset.windows,
            n: config.dataset.n,
            initial_offset: config.dataset.initial_offset,
            min_history: config.dataset.min_history,
            scale: config.dataset.scale,
            screen: config.screen,
        }
    }
}

impl From<&Config> for BacktestConfig {
    fn from(config: &Config) -> Self {
        BacktestConfig {
            start_time: config.backtest.start_time,
            steps: config.backtest.steps,
            step_size: config.backtest.step_size,
            hold_time: config.backtest.hold_time,
            min_history: config.backtest.min_history,
            scale: config.backtest.scale,
            screen: config.screen,
        }
    }
}
