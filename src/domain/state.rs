//! The trading automaton.
//!
//! Seven states with asymmetric long/short branches. Entries are armed by a
//! small-over-medium crossing in a sufficient trend, confirmed by a
//! small-over-large crossing; exits unwind through the opposite crossings.
//! A breached stop-loss limit pre-empts every other transition.

use crate::domain::signal::BarSignals;

/// Automaton states.
///
/// `LongConfirmed`/`LongUnwinding` hold a long position,
/// `ShortConfirmed`/`ShortUnwinding` a short one; the rest are flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeState {
    Idle,
    LongArmed,
    LongConfirmed,
    LongUnwinding,
    ShortArmed,
    ShortConfirmed,
    ShortUnwinding,
}

impl TradeState {
    /// States holding an open position.
    pub fn is_invested(self) -> bool {
        matches!(
            self,
            TradeState::LongConfirmed
                | TradeState::LongUnwinding
                | TradeState::ShortConfirmed
                | TradeState::ShortUnwinding
        )
    }

    /// Position direction held in this state.
    pub fn order_signal(self) -> OrderSignal {
        match self {
            TradeState::LongConfirmed | TradeState::LongUnwinding => OrderSignal::Long,
            TradeState::ShortConfirmed | TradeState::ShortUnwinding => OrderSignal::Short,
            TradeState::Idle | TradeState::LongArmed | TradeState::ShortArmed => OrderSignal::Flat,
        }
    }
}

/// Position direction derived from the automaton state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSignal {
    Long,
    Short,
    #[default]
    Flat,
}

impl OrderSignal {
    /// Numeric form used in report rows: long +1, short -1, flat 0.
    pub fn as_i8(self) -> i8 {
        match self {
            OrderSignal::Long => 1,
            OrderSignal::Short => -1,
            OrderSignal::Flat => 0,
        }
    }
}

/// `a` moved from at-or-below `b` to above it between two adjacent bars.
pub fn crossed_above(cur_a: f64, cur_b: f64, prev_a: f64, prev_b: f64) -> bool {
    cur_a > cur_b && prev_a <= prev_b
}

/// `a` moved from at-or-above `b` to below it between two adjacent bars.
pub fn crossed_below(cur_a: f64, cur_b: f64, prev_a: f64, prev_b: f64) -> bool {
    cur_a < cur_b && prev_a >= prev_b
}

/// Inputs for the stop-loss pre-emption check: the portfolio value realized
/// at the previous bar, the cash committed at the most recent entry, and
/// the configured loss fraction.
#[derive(Debug, Clone, Copy)]
pub struct StopLossCheck {
    pub prior_value: f64,
    pub last_trade_investment: f64,
    pub max_loss: f64,
}

impl StopLossCheck {
    fn hit(&self, state: TradeState) -> bool {
        if !state.is_invested() {
            return false;
        }
        let trade_return =
            (self.prior_value - self.last_trade_investment) / self.last_trade_investment;
        trade_return < -self.max_loss
    }
}

/// Result of one automaton step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: TradeState,
    pub signal: OrderSignal,
    pub stop_loss_triggered: bool,
}

/// Advance the automaton by one bar.
///
/// The stop-loss check runs first and overrides the transition table: a
/// breached limit forces the automaton back to `Idle` for this bar.
/// Otherwise the next state comes from the crossing conditions evaluated
/// over the current and previous bar's signals.
pub fn step(
    state: TradeState,
    current: &BarSignals,
    previous: &BarSignals,
    slope_min: f64,
    stop: StopLossCheck,
) -> StepOutcome {
    if stop.hit(state) {
        return StepOutcome {
            state: TradeState::Idle,
            signal: OrderSignal::Flat,
            stop_loss_triggered: true,
        };
    }

    let next = transition(state, current, previous, slope_min);
    StepOutcome {
        state: next,
        signal: next.order_signal(),
        stop_loss_triggered: false,
    }
}

/// The transition table: state × crossing condition → state. A state with
/// no matching condition holds.
fn transition(
    state: TradeState,
    cur: &BarSignals,
    prev: &BarSignals,
    slope_min: f64,
) -> TradeState {
    use TradeState::*;

    let small_above_medium =
        crossed_above(cur.ma_small, cur.ma_medium, prev.ma_small, prev.ma_medium);
    let small_below_medium =
        crossed_below(cur.ma_small, cur.ma_medium, prev.ma_small, prev.ma_medium);
    let small_above_large = crossed_above(cur.ma_small, cur.ma_large, prev.ma_small, prev.ma_large);
    let small_below_large = crossed_below(cur.ma_small, cur.ma_large, prev.ma_small, prev.ma_large);

    match state {
        Idle if cur.slope > slope_min && small_above_medium => LongArmed,
        Idle if cur.slope < -slope_min && small_below_medium => ShortArmed,
        LongArmed if small_above_large => LongConfirmed,
        LongConfirmed if small_below_medium => LongUnwinding,
        LongUnwinding if small_below_large => Idle,
        ShortArmed if small_below_large => ShortConfirmed,
        ShortConfirmed if small_above_medium => ShortUnwinding,
        ShortUnwinding if small_above_large => Idle,
        unchanged => unchanged,
    }
}
