//! Trend signals: moving averages and the regression slope.
//!
//! All signal values for a bar are taken from suffixes of one trailing
//! price buffer, so a single slice of `slope_window` prices (the largest
//! window) is enough to compute the full set.

use crate::domain::error::TrendtraderError;
use crate::domain::params::ParameterSet;

/// Signal values for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarSignals {
    pub ma_small: f64,
    pub ma_medium: f64,
    pub ma_large: f64,
    pub slope: f64,
}

impl BarSignals {
    /// Neutral all-zero signals recorded for warm-up bars.
    pub fn warmup() -> Self {
        Self::default()
    }
}

/// Arithmetic mean of the window. An empty window averages to zero.
pub fn moving_average(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Ordinary least-squares slope of price against the synthetic index
/// 0..n-1: `(n·Σxy − Σx·Σy) / (n·Σxx − (Σx)²)`.
///
/// Fewer than two points would make the denominator zero, so that case is
/// rejected up front.
pub fn moving_slope(window: &[f64]) -> Result<f64, TrendtraderError> {
    let n = window.len();
    if n < 2 {
        return Err(TrendtraderError::DegenerateWindow { points: n });
    }

    let mut s_x = 0.0;
    let mut s_y = 0.0;
    let mut s_xx = 0.0;
    let mut s_xy = 0.0;
    for (i, &y) in window.iter().enumerate() {
        let x = i as f64;
        s_x += x;
        s_y += y;
        s_xx += x * x;
        s_xy += x * y;
    }

    let n = n as f64;
    Ok((n * s_xy - s_x * s_y) / (n * s_xx - s_x * s_x))
}

/// Compute the three moving averages and the trend slope for the bar the
/// window ends at. The window must hold at least `slope_window` prices.
pub fn generate_signals(
    window: &[f64],
    params: &ParameterSet,
) -> Result<BarSignals, TrendtraderError> {
    if window.len() < params.slope_window {
        return Err(TrendtraderError::InsufficientData {
            bars: window.len(),
            minimum: params.slope_window,
        });
    }

    let suffix = |n: usize| &window[window.len() - n..];
    Ok(BarSignals {
        ma_small: moving_average(suffix(params.small_window)),
        ma_medium: moving_average(suffix(params.medium_window)),
        ma_large: moving_average(suffix(params.large_window)),
        slope: moving_slope(suffix(params.slope_window))?,
    })
}
