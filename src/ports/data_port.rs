//! Price data access port trait.

use crate::domain::error::GoldenCrossError;
use crate::domain::price::PriceBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// A ticker's full series, in non-decreasing date order.
    fn fetch_series(&self, ticker: &str) -> Result<Vec<PriceBar>, GoldenCrossError>;

    /// All tickers available from this source, in discovery order.
    fn list_tickers(&self) -> Result<Vec<String>, GoldenCrossError>;

    /// (first date, last date, bar count) for a ticker, or `None` when the
    /// source has nothing for it.
    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, GoldenCrossError>;
}
