//! Pair enumeration and screening for one window.

pub mod enumerate;
pub mod filter;

pub use enumerate::{enumerate_pairs, DEFAULT_MIN_HISTORY};
pub use filter::ScreenConfig;
