//! Fixed-width text ledger adapter.
//!
//! The downstream chart renderer parses this file positionally, so the
//! column order, widths and the percent scaling (fraction stored, x100
//! displayed) must not change.

use crate::domain::error::GoldenCrossError;
use crate::domain::trade::Trade;
use crate::ports::report_port::ReportPort;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub struct TextLedgerAdapter;

/// Render the sorted ledger as fixed-width text.
pub fn render_ledger(trades: &[Trade]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<10} | {:<12} | {:<12} | {:<12} | {:<12} | {:<12} | {:<15}",
        "Ticker", "Entry Date", "Exit Date", "Entry Price", "Exit Price", "P/L %", "P/L ($)"
    );
    out.push_str(&"-".repeat(100));
    out.push('\n');

    for trade in trades {
        let _ = writeln!(
            out,
            "{:<10} | {:<12} | {:<12} | {:<12.2} | {:<12.2} | {:<12.2}% | {:<15.2}",
            trade.ticker,
            trade.entry_date.to_string(),
            trade.exit_date.to_string(),
            trade.entry_price,
            trade.exit_price,
            trade.profit_loss_pct * 100.0,
            trade.profit_loss_abs,
        );
    }

    out
}

impl ReportPort for TextLedgerAdapter {
    fn write_ledger(&self, trades: &[Trade], output_path: &Path) -> Result<(), GoldenCrossError> {
        fs::write(output_path, render_ledger(trades))?;
        Ok(())
    }
}
