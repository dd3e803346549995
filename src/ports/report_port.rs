//! Report output port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::TrendtraderError;
use crate::domain::metrics::RunSummary;

/// Sink for the per-bar result table and the one-row run summary.
///
/// The timestamp is formatted by the caller; the core never touches wall
/// clocks.
pub trait ReportPort {
    fn write_bars(&self, result: &BacktestResult) -> Result<(), TrendtraderError>;

    fn write_summary(
        &self,
        summary: &RunSummary,
        timestamp: &str,
    ) -> Result<(), TrendtraderError>;
}
