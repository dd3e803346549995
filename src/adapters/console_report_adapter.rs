//! Console report adapter: renders the run summary and the per-bar table
//! to stdout.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::TrendtraderError;
use crate::domain::metrics::{RunSummary, MODE_DOWN, MODE_UP};
use crate::ports::report_port::ReportPort;

pub struct ConsoleReportAdapter;

impl ReportPort for ConsoleReportAdapter {
    fn write_bars(&self, result: &BacktestResult) -> Result<(), TrendtraderError> {
        println!("date,price,ma_small,ma_medium,ma_large,ma_slope,order_signal,portfolio_value,stop_loss");
        for i in 0..result.len() {
            let s = result.signals[i];
            println!(
                "{},{},{},{},{},{},{},{},{}",
                result.dates[i].format("%Y-%m-%d"),
                result.prices[i],
                s.ma_small,
                s.ma_medium,
                s.ma_large,
                s.slope,
                result.order_signals[i].as_i8(),
                result.portfolio_values[i],
                u8::from(result.stop_loss_flags[i]),
            );
        }
        Ok(())
    }

    fn write_summary(
        &self,
        summary: &RunSummary,
        timestamp: &str,
    ) -> Result<(), TrendtraderError> {
        let p = &summary.params;
        println!();
        println!("Simulation results");
        println!("  run timestamp:           {timestamp}");
        println!("  initial index:           {}", summary.first_price);
        println!("  final index:             {}", summary.last_price);
        println!("  index return:            {}%", summary.index_return_pct);
        println!("  initial portfolio:       {}", summary.first_value);
        println!("  final portfolio:         {}", summary.last_value);
        println!("  portfolio return:        {}%", summary.portfolio_return_pct);
        println!("  small window:            {}", p.small_window);
        println!("  medium window:           {}", p.medium_window);
        println!("  large window:            {}", p.large_window);
        println!("  slope window:            {}", p.slope_window);
        println!("  minimum slope:           {}", p.slope_min);
        println!("  stop loss:               {}", p.stop_loss);
        println!("  state machine mode up:   {MODE_UP}");
        println!("  state machine mode down: {MODE_DOWN}");
        println!();
        Ok(())
    }
}
