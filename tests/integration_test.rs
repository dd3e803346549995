//! Integration tests for the full backtest pipeline.
//!
//! Tests cover:
//! - Warm-up behavior on a constant series (CSV file → series → result)
//! - Long entry, mark-to-market tracking and stop-loss exit
//! - Short round trip with the CFD settlement
//! - Run summary derivation and the CSV report files
//! - Precondition failures (window ordering, short history)

mod common;

use approx::assert_relative_eq;
use common::*;
use std::fs;
use tempfile::TempDir;
use trendtrader::adapters::csv_adapter::CsvAdapter;
use trendtrader::adapters::csv_report_adapter::CsvReportAdapter;
use trendtrader::domain::backtest::run_backtest;
use trendtrader::domain::error::TrendtraderError;
use trendtrader::domain::metrics::RunSummary;
use trendtrader::domain::params::ParameterSet;
use trendtrader::domain::signal::BarSignals;
use trendtrader::domain::state::OrderSignal;
use trendtrader::ports::data_port::DataPort;
use trendtrader::ports::report_port::ReportPort;

mod warm_up {
    use super::*;

    #[test]
    fn constant_series_stays_flat_at_initial_cash() {
        let file = write_price_csv(&[10.0; 5]);
        let series = CsvAdapter::new(file.path().to_path_buf())
            .fetch_prices()
            .unwrap();

        let result = run_backtest(&series, &tiny_params()).unwrap();

        assert_eq!(result.len(), 5);
        for i in 0..4 {
            assert_eq!(result.signals[i], BarSignals::warmup());
            assert_eq!(result.order_signals[i], OrderSignal::Flat);
            assert_eq!(result.portfolio_values[i], 1000.0);
            assert!(!result.stop_loss_flags[i]);
        }
        // The one tradable bar computes real signals but never crosses.
        assert_relative_eq!(result.signals[4].ma_small, 10.0);
        assert_relative_eq!(result.signals[4].slope, 0.0);
        assert_eq!(result.order_signals[4], OrderSignal::Flat);
    }
}

mod long_trade {
    use super::*;

    const PRICES: [f64; 10] = [10.0, 10.0, 10.0, 10.0, 11.0, 10.5, 12.0, 9.0, 9.0, 9.0];

    #[test]
    fn long_is_armed_then_confirmed() {
        let result = run_backtest(&series_from(&PRICES[..8]), &tiny_params()).unwrap();

        // Bar 4: rising trend, small crosses medium — armed, still flat.
        assert_relative_eq!(result.signals[4].slope, 0.3, epsilon = 1e-12);
        assert_eq!(result.order_signals[4], OrderSignal::Flat);

        // Bar 6: small crosses large — invested at 12.
        assert_eq!(result.order_signals[6], OrderSignal::Long);
        assert_relative_eq!(result.portfolio_values[6], 1000.0, epsilon = 1e-9);

        // Bar 7: the long marks to market at the bar price.
        assert_eq!(result.order_signals[7], OrderSignal::Long);
        assert_relative_eq!(
            result.portfolio_values[7],
            1000.0 * 9.0 / 12.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn stop_loss_triggers_on_the_bar_after_the_loss() {
        let result = run_backtest(&series_from(&PRICES), &tiny_params()).unwrap();

        // Bar 7 books the 25% loss; the check reads the prior bar's value,
        // so the flag lands on bar 8.
        assert!(!result.stop_loss_flags[7]);
        assert!(result.stop_loss_flags[8]);
        assert_eq!(result.order_signals[8], OrderSignal::Flat);
        assert_relative_eq!(result.portfolio_values[8], 750.0, epsilon = 1e-9);

        // And the automaton stays flat on the next bar.
        assert_eq!(result.order_signals[9], OrderSignal::Flat);
        assert!(!result.stop_loss_flags[9]);
    }
}

mod short_trade {
    use super::*;

    const PRICES: [f64; 11] = [
        10.0, 10.0, 10.0, 10.0, 9.0, 9.5, 8.0, 7.0, 8.0, 7.4, 8.5,
    ];

    #[test]
    fn short_round_trip_settles_like_a_cfd() {
        let result = run_backtest(&series_from(&PRICES), &tiny_params()).unwrap();

        // Entry at 8: value pinned to the invested cash.
        assert_eq!(result.order_signals[6], OrderSignal::Short);
        assert_relative_eq!(result.portfolio_values[6], 1000.0, epsilon = 1e-9);

        // The drop to 7 profits the short by the mirrored price move.
        assert_relative_eq!(result.portfolio_values[7], 1125.0, epsilon = 1e-9);

        // Unwinds through bar 8-9, exits at 8.5 with the mirrored loss.
        assert_eq!(result.order_signals[8], OrderSignal::Short);
        assert_eq!(result.order_signals[10], OrderSignal::Flat);
        assert_relative_eq!(result.portfolio_values[10], 937.5, epsilon = 1e-9);
    }
}

mod run_summary {
    use super::*;

    #[test]
    fn summary_reports_both_returns() {
        let prices = [10.0, 10.0, 10.0, 10.0, 11.0, 10.5, 12.0, 15.0];
        let result = run_backtest(&series_from(&prices), &tiny_params()).unwrap();
        let summary = RunSummary::compute(&result, &tiny_params()).unwrap();

        assert_eq!(summary.first_price, 10.0);
        assert_eq!(summary.last_price, 15.0);
        assert_relative_eq!(summary.index_return_pct, 50.0, epsilon = 1e-9);
        assert_eq!(summary.first_value, 1000.0);
        // Long entered at 12 and marked at 15.
        assert_relative_eq!(summary.last_value, 1250.0, epsilon = 1e-9);
        assert_relative_eq!(summary.portfolio_return_pct, 25.0, epsilon = 1e-9);
    }
}

mod reporting {
    use super::*;

    #[test]
    fn csv_report_writes_one_row_per_bar_and_appends_summaries() {
        let prices = [10.0, 10.0, 10.0, 10.0, 11.0, 10.5, 12.0, 13.0];
        let result = run_backtest(&series_from(&prices), &tiny_params()).unwrap();
        let summary = RunSummary::compute(&result, &tiny_params()).unwrap();

        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("simulation_data.csv");
        let summary_path = dir.path().join("simulation_log.csv");
        let reporter = CsvReportAdapter::new(data_path.clone(), summary_path.clone());

        reporter.write_bars(&result).unwrap();
        reporter.write_summary(&summary, "2024-02-01 10:00:00").unwrap();
        reporter.write_summary(&summary, "2024-02-02 10:00:00").unwrap();

        let data = fs::read_to_string(&data_path).unwrap();
        let lines: Vec<&str> = data.lines().collect();
        assert_eq!(lines.len(), prices.len() + 1);
        assert!(lines[0].starts_with("date,price,ma_small"));
        // Warm-up rows carry neutral defaults.
        assert_eq!(lines[1], "2024-01-01,10,0,0,0,0,0,1000,0");

        let log = fs::read_to_string(&summary_path).unwrap();
        assert_eq!(log.lines().count(), 2);
    }
}

mod preconditions {
    use super::*;

    #[test]
    fn unordered_windows_abort_the_run() {
        let params = ParameterSet {
            medium_window: 3,
            large_window: 2,
            ..tiny_params()
        };
        let err = run_backtest(&series_from(&[10.0; 20]), &params).unwrap_err();
        assert!(matches!(err, TrendtraderError::ParameterOrder { .. }));
    }

    #[test]
    fn short_history_aborts_the_run() {
        let err = run_backtest(&series_from(&[10.0, 11.0]), &tiny_params()).unwrap_err();
        assert!(matches!(
            err,
            TrendtraderError::InsufficientData {
                bars: 2,
                minimum: 4
            }
        ));
    }

    #[test]
    fn non_positive_rows_never_reach_the_driver() {
        let file = write_price_csv(&[10.0, -1.0, 10.0, 0.0, 10.0, 10.0]);
        let series = CsvAdapter::new(file.path().to_path_buf())
            .fetch_prices()
            .unwrap();

        // Two rows were dropped at load time.
        assert_eq!(series.len(), 4);
        let result = run_backtest(&series, &tiny_params()).unwrap();
        assert_eq!(result.len(), 4);
    }
}
