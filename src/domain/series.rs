//! Historical price series storage.

use chrono::NaiveDate;

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Chronologically ordered price observations.
///
/// Insertion order is chronological order. Rows with a non-positive price
/// are rejected at insertion and never stored, so every stored price is
/// strictly positive.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation. Returns `false` and stores nothing when the
    /// price is zero or negative.
    pub fn push(&mut self, date: NaiveDate, price: f64) -> bool {
        if price <= 0.0 {
            return false;
        }
        self.dates.push(date);
        self.prices.push(price);
        true
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn get(&self, index: usize) -> Option<PricePoint> {
        Some(PricePoint {
            date: *self.dates.get(index)?,
            price: *self.prices.get(index)?,
        })
    }

    pub fn first(&self) -> Option<PricePoint> {
        self.get(0)
    }

    pub fn last(&self) -> Option<PricePoint> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }
}
