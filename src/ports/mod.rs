//! Boundary traits between the screening engine and the outside world.
//! Adapters implement these; the core only ever sees the trait.

use thiserror::Error;

use crate::domain::MarketData;

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable series found in {0}")]
    Empty(String),
}

/// Source of historical close series, keyed by symbol.
pub trait MarketDataSource {
    /// Load every available series. Symbols with no valid rows at all are
    /// dropped; short histories are kept and filtered later by the
    /// minimum-history screen.
    fn load(&self) -> Result<MarketData, DataSourceError>;
}
