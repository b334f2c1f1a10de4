//! Filesystem adapter: one headerless CSV per symbol, Yahoo daily-history
//! layout (`date,open,high,low,close,volume,adj_close`), newest row first.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::domain::{Datapoint, MarketData, TimeSeries};
use crate::ports::{DataSourceError, MarketDataSource};

/// Loads every `<SYMBOL>.csv` under a directory. The file stem becomes the
/// symbol; other files are ignored.
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn load_series(&self, symbol: &str, contents: &str) -> Option<TimeSeries> {
        let points: Vec<Datapoint> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            // Tolerate a stray header row even though saved files omit it.
            .filter(|line| !line.starts_with("Date,"))
            .map(Datapoint::parse_line)
            .collect();

        if points.is_empty() || points.iter().all(|p| !p.is_valid()) {
            warn!(symbol, "no valid rows, dropping series");
            return None;
        }

        let series = TimeSeries::new(symbol, points);
        let bad = series.invalid_count();
        if bad > 0 {
            warn!(symbol, invalid_rows = bad, "series contains malformed rows");
        }
        Some(series)
    }
}

impl MarketDataSource for CsvDirectory {
    fn load(&self) -> Result<MarketData, DataSourceError> {
        let mut data = MarketData::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(symbol) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let contents = fs::read_to_string(&path)?;
            if let Some(series) = self.load_series(symbol, &contents) {
                debug!(symbol, days = series.len(), "loaded series");
                data.insert(symbol.to_string(), series);
            }
        }

        if data.is_empty() {
            return Err(DataSourceError::Empty(self.dir.display().to_string()));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &std::path::Path, name: &str, contents: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "AAA.csv",
            "2016-01-05,10,11,9,10.5,1000,10.5\n2016-01-04,9,10,8,9.5,900,9.5\n",
        );
        write_file(
            dir.path(),
            "BBB.csv",
            "2016-01-05,20,21,19,20.5,2000,20.5\n",
        );
        write_file(dir.path(), "notes.txt", "ignore me\n");

        let data = CsvDirectory::new(dir.path()).load().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data["AAA"].close(0), 10.5);
        assert_eq!(data["AAA"].close(1), 9.5);
        assert_eq!(data["BBB"].len(), 1);
    }

    #[test]
    fn test_malformed_rows_become_sentinels() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "AAA.csv",
            "2016-01-05,10,11,9,10.5,1000,10.5\nthis line is garbage\n2016-01-03,9,10,8,9.5,900,9.5\n",
        );

        let data = CsvDirectory::new(dir.path()).load().unwrap();
        let series = &data["AAA"];
        assert_eq!(series.len(), 3);
        assert_eq!(series.invalid_count(), 1);
        assert!(series.close(1).is_nan());
    }

    #[test]
    fn test_header_row_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "AAA.csv",
            "Date,Open,High,Low,Close,Volume,Adj Close\n2016-01-05,10,11,9,10.5,1000,10.5\n",
        );

        let data = CsvDirectory::new(dir.path()).load().unwrap();
        assert_eq!(data["AAA"].len(), 1);
        assert_eq!(data["AAA"].invalid_count(), 0);
    }

    #[test]
    fn test_all_invalid_series_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "AAA.csv", "garbage\nmore garbage\n");
        write_file(
            dir.path(),
            "BBB.csv",
            "2016-01-05,20,21,19,20.5,2000,20.5\n",
        );

        let data = CsvDirectory::new(dir.path()).load().unwrap();
        assert_eq!(data.len(), 1);
        assert!(data.contains_key("BBB"));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvDirectory::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, DataSourceError::Empty(_)));
    }
}
