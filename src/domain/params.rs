//! Strategy parameters for a single run.

use crate::domain::error::TrendtraderError;

/// The fixed strategy configuration a run evaluates.
///
/// The four windows count bars; `slope_min` is the trend threshold the
/// regression slope must clear before a position is armed; `stop_loss` is
/// the loss fraction relative to the entry investment that forces an exit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    pub small_window: usize,
    pub medium_window: usize,
    pub large_window: usize,
    pub slope_window: usize,
    pub slope_min: f64,
    pub stop_loss: f64,
    pub initial_cash: f64,
}

impl ParameterSet {
    /// Windows must be strictly decreasing from slope to small and all
    /// positive; no run can proceed otherwise.
    pub fn validate(&self) -> Result<(), TrendtraderError> {
        if self.slope_window > self.large_window
            && self.large_window > self.medium_window
            && self.medium_window > self.small_window
            && self.small_window > 0
        {
            Ok(())
        } else {
            Err(TrendtraderError::ParameterOrder {
                small: self.small_window,
                medium: self.medium_window,
                large: self.large_window,
                slope: self.slope_window,
            })
        }
    }
}
