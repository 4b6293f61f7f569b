//! Ledger report port trait.

use crate::domain::error::GoldenCrossError;
use crate::domain::trade::Trade;
use std::path::Path;

/// Port for writing the merged trade ledger. The trades are expected to be
/// sorted by entry date already; implementations serialize, never reorder.
pub trait ReportPort {
    fn write_ledger(&self, trades: &[Trade], output_path: &Path) -> Result<(), GoldenCrossError>;
}
