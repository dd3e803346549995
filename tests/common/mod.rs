#![allow(dead_code)]

use chrono::NaiveDate;
use std::io::Write;
use trendtrader::domain::params::ParameterSet;
use trendtrader::domain::series::PriceSeries;

/// Sequential trading days starting 2024-01-01.
pub fn day(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
}

pub fn series_from(prices: &[f64]) -> PriceSeries {
    let mut series = PriceSeries::new();
    for (i, &price) in prices.iter().enumerate() {
        series.push(day(i), price);
    }
    series
}

/// Smallest valid window set, handy for short synthetic paths.
pub fn tiny_params() -> ParameterSet {
    ParameterSet {
        small_window: 1,
        medium_window: 2,
        large_window: 3,
        slope_window: 4,
        slope_min: 0.1,
        stop_loss: 0.2,
        initial_cash: 1000.0,
    }
}

/// Write a `date,price` CSV of the given prices on sequential days.
pub fn write_price_csv(prices: &[f64]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "date,price").unwrap();
    for (i, price) in prices.iter().enumerate() {
        writeln!(file, "{},{}", day(i).format("%Y-%m-%d"), price).unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
