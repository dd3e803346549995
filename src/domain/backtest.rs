//! Backtest driver: warm-up, per-bar loop, result table.

use chrono::NaiveDate;

use crate::domain::error::TrendtraderError;
use crate::domain::params::ParameterSet;
use crate::domain::portfolio::PortfolioState;
use crate::domain::series::PriceSeries;
use crate::domain::signal::{generate_signals, BarSignals};
use crate::domain::state::{step, OrderSignal, StopLossCheck, TradeState};

/// One row of the result table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRecord {
    pub date: NaiveDate,
    pub price: f64,
    pub signals: BarSignals,
    pub order_signal: OrderSignal,
    pub portfolio_value: f64,
    pub stop_loss_triggered: bool,
}

/// Per-bar result arrays, index-aligned 1:1 with the input series.
///
/// Built incrementally by the driver; a row is never rewritten once
/// appended.
#[derive(Debug, Clone, Default)]
pub struct BacktestResult {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub signals: Vec<BarSignals>,
    pub order_signals: Vec<OrderSignal>,
    pub portfolio_values: Vec<f64>,
    pub stop_loss_flags: Vec<bool>,
}

impl BacktestResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bar, keeping every column the same length.
    pub fn push(&mut self, record: BarRecord) {
        self.dates.push(record.date);
        self.prices.push(record.price);
        self.signals.push(record.signals);
        self.order_signals.push(record.order_signal);
        self.portfolio_values.push(record.portfolio_value);
        self.stop_loss_flags.push(record.stop_loss_triggered);
        debug_assert!(self.is_aligned());
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<BarRecord> {
        if index >= self.len() {
            return None;
        }
        Some(BarRecord {
            date: self.dates[index],
            price: self.prices[index],
            signals: self.signals[index],
            order_signal: self.order_signals[index],
            portfolio_value: self.portfolio_values[index],
            stop_loss_triggered: self.stop_loss_flags[index],
        })
    }

    fn is_aligned(&self) -> bool {
        let n = self.dates.len();
        self.prices.len() == n
            && self.signals.len() == n
            && self.order_signals.len() == n
            && self.portfolio_values.len() == n
            && self.stop_loss_flags.len() == n
    }
}

/// Replay the series bar by bar against one strategy configuration.
///
/// The first `slope_window` bars are warm-up: neutral signals, flat, the
/// portfolio at its initial cash. From then on each bar takes the trailing
/// `slope_window` prices, computes signals, steps the automaton (whose
/// stop-loss check reads the previous bar's realized value), and lets the
/// portfolio execute the resulting signal change.
pub fn run_backtest(
    series: &PriceSeries,
    params: &ParameterSet,
) -> Result<BacktestResult, TrendtraderError> {
    params.validate()?;

    let prices = series.prices();
    let dates = series.dates();
    if prices.len() < params.slope_window {
        return Err(TrendtraderError::InsufficientData {
            bars: prices.len(),
            minimum: params.slope_window,
        });
    }

    let mut result = BacktestResult::new();
    let mut state = TradeState::Idle;
    let mut portfolio = PortfolioState::new(params.initial_cash);

    for i in 0..params.slope_window {
        result.push(BarRecord {
            date: dates[i],
            price: prices[i],
            signals: BarSignals::warmup(),
            order_signal: OrderSignal::Flat,
            portfolio_value: params.initial_cash,
            stop_loss_triggered: false,
        });
    }

    for i in params.slope_window..prices.len() {
        let window = &prices[i + 1 - params.slope_window..=i];
        let signals = generate_signals(window, params)?;

        let stop = StopLossCheck {
            prior_value: result.portfolio_values[i - 1],
            last_trade_investment: portfolio.last_trade_investment,
            max_loss: params.stop_loss,
        };
        let outcome = step(state, &signals, &result.signals[i - 1], params.slope_min, stop);
        state = outcome.state;

        let previous_order = result.order_signals[i - 1];
        let portfolio_value = portfolio.apply(previous_order, outcome.signal, prices[i]);

        result.push(BarRecord {
            date: dates[i],
            price: prices[i],
            signals,
            order_signal: outcome.signal,
            portfolio_value,
            stop_loss_triggered: outcome.stop_loss_triggered,
        });
    }

    Ok(result)
}
