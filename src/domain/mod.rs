//! Domain Layer - the data model shared by every stage of the pipeline.
//!
//! Pure types with no I/O: price series, per-pair statistic rows, and
//! simulated trade outcomes. External interactions happen through the ports
//! layer.

pub mod pair;
pub mod series;
pub mod trade;

pub use pair::{field, PairRecord, StatisticVector};
pub use series::{Datapoint, MarketData, TimeSeries};
pub use trade::TradeRecord;
