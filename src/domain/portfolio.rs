//! CFD portfolio bookkeeping and mark-to-market valuation.
//!
//! Entries commit all cash into CFD units at the bar price. A long exit
//! sells the units back; a short exit settles the contract by mirroring the
//! price move around the entry investment, so a falling price pays out.

use crate::domain::state::OrderSignal;

/// Cash and open-position bookkeeping for one run.
///
/// `last_trade_investment` is the cash committed at the most recent entry;
/// the stop-loss check and the short-side settlement both read it. It
/// starts at 1.0 and is only meaningful once a trade has been entered.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    pub cash: f64,
    pub position_units: f64,
    pub last_trade_investment: f64,
}

impl PortfolioState {
    pub fn new(initial_cash: f64) -> Self {
        PortfolioState {
            cash: initial_cash,
            position_units: 0.0,
            last_trade_investment: 1.0,
        }
    }

    /// Apply one bar: execute the entry or exit implied by the signal
    /// change, then return the mark-to-market value at `price`.
    pub fn apply(&mut self, previous: OrderSignal, current: OrderSignal, price: f64) -> f64 {
        self.execute(previous, current, price);
        self.mark_to_market(current, price)
    }

    fn execute(&mut self, previous: OrderSignal, current: OrderSignal, price: f64) {
        use crate::domain::state::OrderSignal::*;
        match (previous, current) {
            // Entry bookkeeping is identical for both directions.
            (Flat, Long) | (Flat, Short) => {
                self.last_trade_investment = self.cash;
                self.position_units = self.cash / price;
                self.cash = 0.0;
            }
            (Long, Flat) => {
                self.cash = self.position_units * price;
                self.position_units = 0.0;
            }
            (Short, Flat) => {
                // CFD settlement: profit and loss mirror around the entry
                // investment.
                self.cash = 2.0 * self.last_trade_investment - self.position_units * price;
                self.position_units = 0.0;
            }
            _ => {}
        }
    }

    /// Portfolio value at `price` under the given position direction.
    pub fn mark_to_market(&self, signal: OrderSignal, price: f64) -> f64 {
        match signal {
            OrderSignal::Long => self.cash + self.position_units * price,
            OrderSignal::Short => {
                self.cash + 2.0 * self.last_trade_investment - self.position_units * price
            }
            OrderSignal::Flat => self.cash,
        }
    }
}
