//! Daily price bar representation.

use chrono::NaiveDate;

/// One trading day for one ticker. Series handed to the engine are assumed
/// to be in non-decreasing date order; the engine never re-sorts input.
#[derive(Debug, Clone)]
pub struct PriceBar {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

/// True when every consecutive pair of bars is in non-decreasing date order.
pub fn is_chronological(bars: &[PriceBar]) -> bool {
    bars.windows(2).all(|w| w[0].date <= w[1].date)
}
