//! CSV price file data adapter.
//!
//! Expects a header line followed by `date,price` rows. Rows with a
//! non-positive price are dropped (the series never stores them).

use crate::domain::error::TrendtraderError;
use crate::domain::series::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DataPort for CsvAdapter {
    fn fetch_prices(&self) -> Result<PriceSeries, TrendtraderError> {
        let content = fs::read_to_string(&self.path).map_err(|e| TrendtraderError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut series = PriceSeries::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TrendtraderError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| TrendtraderError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                TrendtraderError::Data {
                    reason: format!("invalid date {date_str:?}: {e}"),
                }
            })?;

            let price_str = record.get(1).ok_or_else(|| TrendtraderError::Data {
                reason: format!("missing price column on {date_str}"),
            })?;
            let price: f64 = price_str.trim().parse().map_err(|e| TrendtraderError::Data {
                reason: format!("invalid price {price_str:?} on {date_str}: {e}"),
            })?;

            series.push(date, price);
        }

        Ok(series)
    }
}
