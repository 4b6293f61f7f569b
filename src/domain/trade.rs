//! Trade and open-position types.

use chrono::NaiveDate;

/// A position that has been opened but not yet closed. At most one exists
/// per ticker at any time.
#[derive(Debug, Clone)]
pub struct OpenPosition {
    pub ticker: String,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
}

impl OpenPosition {
    /// Share count for fixed notional sizing: every trade risks the same
    /// currency amount at entry regardless of price.
    pub fn shares(&self, unit_size: f64) -> f64 {
        unit_size / self.entry_price
    }

    pub fn unrealized_pnl(&self, price: f64, unit_size: f64) -> f64 {
        (price - self.entry_price) * self.shares(unit_size)
    }

    /// Consume the position into a closed [`Trade`] at the given exit bar.
    pub fn close(self, exit_date: NaiveDate, exit_price: f64, unit_size: f64) -> Trade {
        let profit_loss_abs = (exit_price - self.entry_price) * self.shares(unit_size);
        Trade {
            ticker: self.ticker,
            entry_date: self.entry_date,
            exit_date,
            entry_price: self.entry_price,
            exit_price,
            profit_loss_pct: (exit_price - self.entry_price) / self.entry_price,
            profit_loss_abs,
        }
    }
}

/// One closed (or forced-closed) position. `profit_loss_pct` is a signed
/// fraction (exit/entry - 1); `profit_loss_abs` is the signed currency
/// amount for the fixed notional unit.
#[derive(Debug, Clone)]
pub struct Trade {
    pub ticker: String,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub profit_loss_pct: f64,
    pub profit_loss_abs: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.profit_loss_abs > 0.0
    }
}
