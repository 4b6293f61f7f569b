//! Crossover detection and the per-ticker trade state machine.
//!
//! Two states per ticker: flat (no open position) and long (exactly one).
//! An up-cross of the short SMA through the long SMA opens a position, a
//! down-cross closes it. Both fills use the open price of the bar where the
//! crossover is detected; the SMAs at that bar only use closes up to and
//! including it, so this is look-ahead free.

use crate::domain::price::{is_chronological, PriceBar};
use crate::domain::sma::calculate_sma;
use crate::domain::trade::{OpenPosition, Trade};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub short_window: usize,
    pub long_window: usize,
    /// Currency amount risked per trade (notional unit sizing).
    pub unit_size: f64,
    /// Consumed by the downstream visualization, not by the engine.
    pub initial_capital: f64,
    /// Force-close a still-open position at the final bar's open. When
    /// false, the position is reported as unrealized instead.
    pub close_at_end: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            short_window: 50,
            long_window: 200,
            unit_size: 1000.0,
            initial_capital: 10_000.0,
            close_at_end: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BacktestOutcome {
    pub trades: Vec<Trade>,
    /// A position still open at the end of the series, present only when
    /// `close_at_end` is disabled.
    pub open: Option<OpenPosition>,
}

/// Run the crossover strategy over one ticker's series.
///
/// A series shorter than the long window produces an empty outcome; the
/// caller treats that as a skip, not an error.
pub fn backtest_ticker(ticker: &str, bars: &[PriceBar], config: &EngineConfig) -> BacktestOutcome {
    debug_assert!(is_chronological(bars));
    if bars.len() < config.long_window || config.long_window == 0 {
        return BacktestOutcome::default();
    }

    let short = calculate_sma(bars, config.short_window);
    let long = calculate_sma(bars, config.long_window);

    let mut trades: Vec<Trade> = Vec::new();
    let mut open: Option<OpenPosition> = None;

    // First index where both the current and previous long SMA are valid.
    for i in config.long_window..bars.len() {
        let (Some(short_now), Some(short_prev), Some(long_now), Some(long_prev)) = (
            short.value_at(i),
            short.value_at(i - 1),
            long.value_at(i),
            long.value_at(i - 1),
        ) else {
            continue;
        };

        // Entry: short crosses above long. Ignored while a position is
        // already open (no pyramiding).
        if short_now > long_now && short_prev <= long_prev && open.is_none() {
            open = Some(OpenPosition {
                ticker: ticker.to_string(),
                entry_date: bars[i].date,
                entry_price: bars[i].open,
            });
        }

        // Exit: short crosses below long. Ignored while flat. The two
        // conditions require opposite inequalities and cannot both hold at
        // one index.
        if short_now < long_now && short_prev >= long_prev {
            if let Some(position) = open.take() {
                trades.push(position.close(bars[i].date, bars[i].open, config.unit_size));
            }
        }
    }

    if config.close_at_end {
        if let Some(position) = open.take() {
            let last = &bars[bars.len() - 1];
            trades.push(position.close(last.date, last.open, config.unit_size));
        }
    }

    BacktestOutcome { trades, open }
}
