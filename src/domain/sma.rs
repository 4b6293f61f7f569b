//! Simple Moving Average over close prices.
//!
//! O(n) rolling-sum implementation: the first full window is summed
//! directly, each later value subtracts the element leaving the window and
//! adds the element entering it.
//! Warmup: the first (window - 1) points are invalid.

use crate::domain::price::PriceBar;

/// One SMA value aligned to a source bar. `value` is 0.0 and must not be
/// read as signal while `valid` is false.
#[derive(Debug, Clone)]
pub struct SmaPoint {
    pub date: chrono::NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct SmaSeries {
    pub window: usize,
    pub points: Vec<SmaPoint>,
}

impl SmaSeries {
    /// The valid SMA value at `index`, or `None` during warmup.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        let point = self.points.get(index)?;
        point.valid.then_some(point.value)
    }
}

/// Insufficient data (fewer bars than the window, or a zero window) yields a
/// series with no points rather than an error.
pub fn calculate_sma(bars: &[PriceBar], window: usize) -> SmaSeries {
    if window == 0 || bars.len() < window {
        return SmaSeries {
            window,
            points: Vec::new(),
        };
    }

    let mut points = Vec::with_capacity(bars.len());
    let mut sum: f64 = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i < window {
            sum += bar.close;
        } else {
            sum += bar.close - bars[i - window].close;
        }

        let valid = i >= window - 1;
        let value = if valid { sum / window as f64 } else { 0.0 };

        points.push(SmaPoint {
            date: bar.date,
            valid,
            value,
        });
    }

    SmaSeries { window, points }
}
