//! CSV report adapter.
//!
//! Writes the per-bar simulation table to one file and appends a one-row
//! summary to a log that accumulates across runs.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::TrendtraderError;
use crate::domain::metrics::{RunSummary, MODE_DOWN, MODE_UP};
use crate::ports::report_port::ReportPort;
use std::fs::OpenOptions;
use std::path::PathBuf;

pub struct CsvReportAdapter {
    data_path: PathBuf,
    summary_path: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(data_path: PathBuf, summary_path: PathBuf) -> Self {
        Self {
            data_path,
            summary_path,
        }
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_bars(&self, result: &BacktestResult) -> Result<(), TrendtraderError> {
        let mut wtr = csv::Writer::from_path(&self.data_path).map_err(csv_error)?;

        wtr.write_record([
            "date",
            "price",
            "ma_small",
            "ma_medium",
            "ma_large",
            "ma_slope",
            "order_signal",
            "portfolio_value",
            "stop_loss",
        ])
        .map_err(csv_error)?;

        for i in 0..result.len() {
            let s = result.signals[i];
            wtr.write_record([
                result.dates[i].format("%Y-%m-%d").to_string(),
                result.prices[i].to_string(),
                s.ma_small.to_string(),
                s.ma_medium.to_string(),
                s.ma_large.to_string(),
                s.slope.to_string(),
                result.order_signals[i].as_i8().to_string(),
                result.portfolio_values[i].to_string(),
                u8::from(result.stop_loss_flags[i]).to_string(),
            ])
            .map_err(csv_error)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn write_summary(
        &self,
        summary: &RunSummary,
        timestamp: &str,
    ) -> Result<(), TrendtraderError> {
        // The log keeps one row per run, no header, append-only.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.summary_path)?;
        let mut wtr = csv::Writer::from_writer(file);

        let p = &summary.params;
        wtr.write_record([
            timestamp.to_string(),
            summary.first_price.to_string(),
            summary.last_price.to_string(),
            format!("{}%", summary.index_return_pct),
            summary.first_value.to_string(),
            summary.last_value.to_string(),
            format!("{}%", summary.portfolio_return_pct),
            p.small_window.to_string(),
            p.medium_window.to_string(),
            p.large_window.to_string(),
            p.slope_window.to_string(),
            p.slope_min.to_string(),
            p.stop_loss.to_string(),
            MODE_UP.to_string(),
            MODE_DOWN.to_string(),
        ])
        .map_err(csv_error)?;

        wtr.flush()?;
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> TrendtraderError {
    TrendtraderError::Data {
        reason: format!("CSV write error: {}", e),
    }
}
