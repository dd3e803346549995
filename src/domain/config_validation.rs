//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::TrendtraderError;
use crate::ports::config_port::ConfigPort;

const WINDOW_KEYS: [&str; 4] = [
    "small_window",
    "medium_window",
    "large_window",
    "slope_window",
];

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), TrendtraderError> {
    for key in WINDOW_KEYS {
        validate_window(config, key)?;
    }
    validate_slope_min(config)?;
    validate_stop_loss(config)?;
    validate_initial_cash(config)?;
    Ok(())
}

fn validate_window(config: &dyn ConfigPort, key: &str) -> Result<(), TrendtraderError> {
    if config.get_string("strategy", key).is_none() {
        return Err(TrendtraderError::ConfigMissing {
            section: "strategy".to_string(),
            key: key.to_string(),
        });
    }
    let value = config.get_int("strategy", key, 0);
    if value <= 0 {
        return Err(TrendtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be a positive integer"),
        });
    }
    Ok(())
}

fn validate_slope_min(config: &dyn ConfigPort) -> Result<(), TrendtraderError> {
    let value = config.get_double("strategy", "slope_min", 0.0);
    if value < 0.0 {
        return Err(TrendtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "slope_min".to_string(),
            reason: "slope_min must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_stop_loss(config: &dyn ConfigPort) -> Result<(), TrendtraderError> {
    let value = config.get_double("strategy", "stop_loss", 0.0);
    if value < 0.0 {
        return Err(TrendtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "stop_loss".to_string(),
            reason: "stop_loss must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), TrendtraderError> {
    let value = config.get_double("backtest", "initial_cash", 0.0);
    if value <= 0.0 {
        return Err(TrendtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }
    Ok(())
}
