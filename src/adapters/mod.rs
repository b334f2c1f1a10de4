//! Concrete implementations of the boundary traits in `ports`.

pub mod csv_source;

pub use csv_source::CsvDirectory;
