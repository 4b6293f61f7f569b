//! Multi-ticker runner: per-ticker backtests, aggregation and ranking.
//!
//! Per-ticker failures (unreadable file, missing columns, too few bars) are
//! absorbed into [`SkippedTicker`] entries and never abort the run; only the
//! discovery step itself can fail, and that happens before this module is
//! reached.

use crate::domain::signal::{backtest_ticker, EngineConfig};
use crate::domain::trade::{OpenPosition, Trade};
use crate::ports::data_port::DataPort;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct TickerSummary {
    pub ticker: String,
    pub trades: usize,
    pub total_pnl: f64,
    /// Fraction of trades with positive absolute P/L.
    pub win_rate: f64,
}

impl TickerSummary {
    pub fn from_trades(ticker: &str, trades: &[Trade]) -> Self {
        let winners = trades.iter().filter(|t| t.is_winner()).count();
        let win_rate = if trades.is_empty() {
            0.0
        } else {
            winners as f64 / trades.len() as f64
        };
        TickerSummary {
            ticker: ticker.to_string(),
            trades: trades.len(),
            total_pnl: trades.iter().map(|t| t.profit_loss_abs).sum(),
            win_rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub enum SkipReason {
    Unreadable { reason: String },
    InsufficientBars { bars: usize, minimum: usize },
}

/// Everything a full run produces. Empty `summaries` and `ledger` are a
/// normal terminal state, not an error.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// One entry per ticker that produced at least one trade, ranked by
    /// total absolute P/L descending (ties keep discovery order).
    pub summaries: Vec<TickerSummary>,
    /// All trades across all tickers, stable-sorted by entry date ascending.
    pub ledger: Vec<Trade>,
    pub skipped: Vec<SkippedTicker>,
    /// Positions left open at series end when force-close is disabled.
    pub open_positions: Vec<OpenPosition>,
}

/// Run the backtest over every ticker in discovery order and aggregate.
pub fn run_universe(
    data_port: &dyn DataPort,
    tickers: &[String],
    config: &EngineConfig,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();

    for ticker in tickers {
        let bars = match data_port.fetch_series(ticker) {
            Ok(bars) => bars,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", ticker, e);
                outcome.skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: SkipReason::Unreadable {
                        reason: e.to_string(),
                    },
                });
                continue;
            }
        };

        if bars.len() < config.long_window {
            eprintln!(
                "Warning: skipping {} (only {} bars, minimum {} required)",
                ticker,
                bars.len(),
                config.long_window
            );
            outcome.skipped.push(SkippedTicker {
                ticker: ticker.clone(),
                reason: SkipReason::InsufficientBars {
                    bars: bars.len(),
                    minimum: config.long_window,
                },
            });
            continue;
        }

        let result = backtest_ticker(ticker, &bars, config);
        if !result.trades.is_empty() {
            outcome
                .summaries
                .push(TickerSummary::from_trades(ticker, &result.trades));
            outcome.ledger.extend(result.trades);
        }
        if let Some(position) = result.open {
            outcome.open_positions.push(position);
        }
    }

    rank_summaries(&mut outcome.summaries);
    sort_ledger(&mut outcome.ledger);
    outcome
}

/// Total absolute P/L descending; stable, so ties keep insertion order.
pub fn rank_summaries(summaries: &mut [TickerSummary]) {
    summaries.sort_by(|a, b| {
        b.total_pnl
            .partial_cmp(&a.total_pnl)
            .unwrap_or(Ordering::Equal)
    });
}

/// Entry date ascending; stable, so equal-date trades keep per-ticker order.
pub fn sort_ledger(ledger: &mut [Trade]) {
    ledger.sort_by_key(|t| t.entry_date);
}
