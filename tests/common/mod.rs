#![allow(dead_code)]

use chrono::NaiveDate;
use goldencross::domain::error::GoldenCrossError;
use goldencross::domain::price::PriceBar;
use goldencross::domain::signal::EngineConfig;
use goldencross::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, ticker: &str) -> Result<Vec<PriceBar>, GoldenCrossError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(GoldenCrossError::DataSource {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }

    fn list_tickers(&self) -> Result<Vec<String>, GoldenCrossError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, GoldenCrossError> {
        match self.data.get(ticker) {
            Some(bars) if !bars.is_empty() => Ok(Some((
                bars[0].date,
                bars[bars.len() - 1].date,
                bars.len(),
            ))),
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Bars on consecutive days starting at `start`, with open == close.
pub fn make_series(ticker: &str, start: NaiveDate, closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            ticker: ticker.to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: close,
            close,
        })
        .collect()
}

/// A series that produces exactly one trade under [`small_config`]:
/// SMA(2) crosses above SMA(3) at index 3 (fills at `entry_open`) and back
/// below at index 5 (fills at `exit_open`).
pub fn single_trade_series(
    ticker: &str,
    start: NaiveDate,
    entry_open: f64,
    exit_open: f64,
) -> Vec<PriceBar> {
    let mut bars = make_series(ticker, start, &[10.0, 10.0, 10.0, 20.0, 20.0, 10.0]);
    bars[3].open = entry_open;
    bars[5].open = exit_open;
    bars
}

pub fn small_config() -> EngineConfig {
    EngineConfig {
        short_window: 2,
        long_window: 3,
        unit_size: 1000.0,
        initial_capital: 10_000.0,
        close_at_end: true,
    }
}
