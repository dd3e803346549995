//! Run summary statistics.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::TrendtraderError;
use crate::domain::params::ParameterSet;

/// Automaton branch flags echoed into every summary row. Both branches are
/// always enabled; the columns exist so the summary log keeps a stable
/// shape.
pub const MODE_UP: u8 = 1;
pub const MODE_DOWN: u8 = 1;

/// One-row summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub first_price: f64,
    pub last_price: f64,
    pub index_return_pct: f64,
    pub first_value: f64,
    pub last_value: f64,
    pub portfolio_return_pct: f64,
    pub params: ParameterSet,
}

impl RunSummary {
    /// Derive the summary from a finished result table.
    ///
    /// Percentage returns need a non-zero reference; a zero first price or
    /// first portfolio value is an error rather than a silent infinity.
    pub fn compute(
        result: &BacktestResult,
        params: &ParameterSet,
    ) -> Result<Self, TrendtraderError> {
        if result.is_empty() {
            return Err(TrendtraderError::InsufficientData {
                bars: 0,
                minimum: 1,
            });
        }

        let first_price = result.prices[0];
        let last_price = result.prices[result.len() - 1];
        let first_value = result.portfolio_values[0];
        let last_value = result.portfolio_values[result.len() - 1];

        Ok(RunSummary {
            first_price,
            last_price,
            index_return_pct: percentage_return(first_price, last_price, "index return")?,
            first_value,
            last_value,
            portfolio_return_pct: percentage_return(
                first_value,
                last_value,
                "portfolio return",
            )?,
            params: params.clone(),
        })
    }
}

fn percentage_return(first: f64, last: f64, what: &str) -> Result<f64, TrendtraderError> {
    if first == 0.0 {
        return Err(TrendtraderError::DivisionByZero {
            what: what.to_string(),
        });
    }
    Ok(100.0 * (last - first) / first)
}
