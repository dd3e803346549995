//! Price data access port trait.

use crate::domain::error::TrendtraderError;
use crate::domain::series::PriceSeries;

/// Source of the historical price series a run replays.
pub trait DataPort {
    fn fetch_prices(&self) -> Result<PriceSeries, TrendtraderError>;
}
