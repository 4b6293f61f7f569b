//! CSV directory data adapter.
//!
//! Reads per-ticker price files written by the collection step. Files are
//! named `{TICKER}_yahoo_finance.csv` (plain `{TICKER}.csv` also accepted)
//! with a header row containing at least DATE, OPEN and CLOSE; column names
//! are matched case-insensitively and any extra columns are ignored.

use crate::domain::error::GoldenCrossError;
use crate::domain::price::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const COLLECTED_SUFFIX: &str = "_yahoo_finance.csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn series_path(&self, ticker: &str) -> Option<PathBuf> {
        let collected = self.base_path.join(format!("{}{}", ticker, COLLECTED_SUFFIX));
        if collected.exists() {
            return Some(collected);
        }
        let plain = self.base_path.join(format!("{}.csv", ticker));
        plain.exists().then_some(plain)
    }

    fn column_index(
        headers: &csv::StringRecord,
        name: &str,
        ticker: &str,
    ) -> Result<usize, GoldenCrossError> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| GoldenCrossError::MissingColumn {
                ticker: ticker.to_string(),
                column: name.to_string(),
            })
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, ticker: &str) -> Result<Vec<PriceBar>, GoldenCrossError> {
        let path = self
            .series_path(ticker)
            .ok_or_else(|| GoldenCrossError::DataSource {
                ticker: ticker.to_string(),
                reason: format!("no CSV file in {}", self.base_path.display()),
            })?;

        let mut rdr = csv::Reader::from_path(&path).map_err(|e| GoldenCrossError::DataSource {
            ticker: ticker.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let headers = rdr
            .headers()
            .map_err(|e| GoldenCrossError::DataSource {
                ticker: ticker.to_string(),
                reason: format!("CSV header error: {}", e),
            })?
            .clone();

        let date_idx = Self::column_index(&headers, "DATE", ticker)?;
        let open_idx = Self::column_index(&headers, "OPEN", ticker)?;
        let close_idx = Self::column_index(&headers, "CLOSE", ticker)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| GoldenCrossError::DataSource {
                ticker: ticker.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let field = |idx: usize, name: &str| {
                record
                    .get(idx)
                    .ok_or_else(|| GoldenCrossError::DataSource {
                        ticker: ticker.to_string(),
                        reason: format!("row missing {} value", name),
                    })
            };

            let date = NaiveDate::parse_from_str(field(date_idx, "DATE")?, "%Y-%m-%d").map_err(
                |e| GoldenCrossError::DataSource {
                    ticker: ticker.to_string(),
                    reason: format!("invalid date: {}", e),
                },
            )?;

            let open: f64 =
                field(open_idx, "OPEN")?
                    .parse()
                    .map_err(|e| GoldenCrossError::DataSource {
                        ticker: ticker.to_string(),
                        reason: format!("invalid open value: {}", e),
                    })?;

            let close: f64 =
                field(close_idx, "CLOSE")?
                    .parse()
                    .map_err(|e| GoldenCrossError::DataSource {
                        ticker: ticker.to_string(),
                        reason: format!("invalid close value: {}", e),
                    })?;

            bars.push(PriceBar {
                ticker: ticker.to_string(),
                date,
                open,
                close,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_tickers(&self) -> Result<Vec<String>, GoldenCrossError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| GoldenCrossError::Discovery {
            path: self.base_path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GoldenCrossError::Discovery {
                path: self.base_path.display().to_string(),
                reason: e.to_string(),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(ticker) = name_str.strip_suffix(COLLECTED_SUFFIX) {
                tickers.push(ticker.to_string());
            } else if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, GoldenCrossError> {
        if self.series_path(ticker).is_none() {
            return Ok(None);
        }

        let bars = self.fetch_series(ticker)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "DATE,OPEN,HIGH,LOW,CLOSE,VOLUME,LOG_RETURNS\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000,0.04\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000,\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000,0.05\n";

        fs::write(path.join("AAPL_yahoo_finance.csv"), csv_content).unwrap();
        fs::write(path.join("MSFT.csv"), "date,open,close\n2024-01-15,50.0,51.0\n").unwrap();
        fs::write(
            path.join("BROKEN_yahoo_finance.csv"),
            "DATE,HIGH,LOW\n2024-01-15,1.0,1.0\n",
        )
        .unwrap();
        fs::write(path.join("notes.txt"), "not a csv").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_series_parses_and_sorts() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_series("AAPL").unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[2].date, NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
    }

    #[test]
    fn fetch_series_lowercase_headers() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_series("MSFT").unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 51.0);
    }

    #[test]
    fn fetch_series_missing_column() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_series("BROKEN").unwrap_err();
        assert!(matches!(
            err,
            GoldenCrossError::MissingColumn { ref column, .. } if column == "OPEN"
        ));
    }

    #[test]
    fn fetch_series_missing_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        assert!(adapter.fetch_series("XYZ").is_err());
    }

    #[test]
    fn list_tickers_strips_suffixes() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let tickers = adapter.list_tickers().unwrap();
        assert_eq!(tickers, vec!["AAPL", "BROKEN", "MSFT"]);
    }

    #[test]
    fn list_tickers_missing_directory_is_fatal() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/data"));
        let err = adapter.list_tickers().unwrap_err();
        assert!(matches!(err, GoldenCrossError::Discovery { .. }));
    }

    #[test]
    fn data_range_reports_bounds() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let (first, last, count) = adapter.data_range("AAPL").unwrap().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
        assert_eq!(count, 3);
    }

    #[test]
    fn data_range_none_for_unknown_ticker() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        assert!(adapter.data_range("XYZ").unwrap().is_none());
    }
}
