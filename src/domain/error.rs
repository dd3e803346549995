//! Domain error types.

/// Top-level error type for trendtrader.
#[derive(Debug, thiserror::Error)]
pub enum TrendtraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price data error: {reason}")]
    Data { reason: String },

    #[error(
        "window ordering violated: need slope ({slope}) > large ({large}) > medium ({medium}) > small ({small}) > 0"
    )]
    ParameterOrder {
        small: usize,
        medium: usize,
        large: usize,
        slope: usize,
    },

    #[error("insufficient price history: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("regression window needs at least 2 points, got {points}")]
    DegenerateWindow { points: usize },

    #[error("division by zero computing {what}")]
    DivisionByZero { what: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TrendtraderError> for std::process::ExitCode {
    fn from(err: &TrendtraderError) -> Self {
        let code: u8 = match err {
            TrendtraderError::Io(_) => 1,
            TrendtraderError::ConfigParse { .. }
            | TrendtraderError::ConfigMissing { .. }
            | TrendtraderError::ConfigInvalid { .. } => 2,
            TrendtraderError::Data { .. } => 3,
            TrendtraderError::ParameterOrder { .. } => 4,
            TrendtraderError::InsufficientData { .. }
            | TrendtraderError::DegenerateWindow { .. }
            | TrendtraderError::DivisionByZero { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
