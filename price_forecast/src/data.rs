//! Price observations, predictions and validated historical series

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single historical price point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Price, expected to be positive
    pub price: f64,
    /// Ticker symbol
    pub symbol: String,
    /// Traded volume; carried along but not used for forecasting
    #[serde(default)]
    pub volume: Option<u64>,
}

impl Observation {
    /// Create an observation without volume
    pub fn new(date: NaiveDate, price: f64, symbol: impl Into<String>) -> Self {
        Self {
            date,
            price,
            symbol: symbol.into(),
            volume: None,
        }
    }

    /// Attach a traded volume
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Check the price is a positive finite number and the symbol is present
    pub fn validate(&self) -> Result<()> {
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ForecastError::InvalidObservation(format!(
                "price on {} must be a positive number, got {}",
                self.date, self.price
            )));
        }

        if self.symbol.trim().is_empty() {
            return Err(ForecastError::InvalidObservation(format!(
                "symbol is required for the observation on {}",
                self.date
            )));
        }

        Ok(())
    }
}

/// A forecast price for one future date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Forecast date
    pub date: NaiveDate,
    /// Forecast price, rounded to cents
    pub price: f64,
    /// Heuristic confidence percentage, see [`crate::confidence`]
    pub confidence: u8,
}

/// Chronologically ordered observations with unique dates
///
/// Mirrors manual data entry: every added observation is validated, duplicate
/// dates are rejected and the series stays sorted by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSeries {
    observations: Vec<Observation>,
}

impl HistoricalSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert an observation at its chronological position
    pub fn add(&mut self, observation: Observation) -> Result<()> {
        observation.validate()?;

        match self
            .observations
            .binary_search_by_key(&observation.date, |o| o.date)
        {
            Ok(_) => Err(ForecastError::DuplicateDate(observation.date)),
            Err(position) => {
                self.observations.insert(position, observation);
                Ok(())
            }
        }
    }

    /// Remove the observation at `index`, if present
    pub fn remove(&mut self, index: usize) -> Option<Observation> {
        if index < self.observations.len() {
            Some(self.observations.remove(index))
        } else {
            None
        }
    }

    /// Observations in date order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Consume the series and return its observations in date order
    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Last observed date, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl TryFrom<Vec<Observation>> for HistoricalSeries {
    type Error = ForecastError;

    fn try_from(observations: Vec<Observation>) -> Result<Self> {
        let mut series = Self::new();
        for observation in observations {
            series.add(observation)?;
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_add_keeps_date_order() {
        let mut series = HistoricalSeries::new();
        series.add(Observation::new(day(3), 101.0, "MSFT")).unwrap();
        series.add(Observation::new(day(1), 99.0, "MSFT")).unwrap();
        series.add(Observation::new(day(2), 100.0, "MSFT")).unwrap();

        let dates: Vec<_> = series.observations().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(series.last_date(), Some(day(3)));
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let mut series = HistoricalSeries::new();
        series.add(Observation::new(day(1), 99.0, "MSFT")).unwrap();

        let result = series.add(Observation::new(day(1), 105.0, "MSFT"));
        assert!(matches!(result, Err(ForecastError::DuplicateDate(d)) if d == day(1)));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_invalid_price_rejected() {
        let mut series = HistoricalSeries::new();
        for price in [0.0, -3.0, f64::NAN] {
            let result = series.add(Observation::new(day(1), price, "MSFT"));
            assert!(matches!(result, Err(ForecastError::InvalidObservation(_))));
        }
        assert!(series.is_empty());
    }

    #[test]
    fn test_missing_symbol_rejected() {
        let observation = Observation::new(day(1), 10.0, "  ");
        assert!(observation.validate().is_err());
    }

    #[test]
    fn test_remove_entry() {
        let mut series =
            HistoricalSeries::try_from(vec![
                Observation::new(day(1), 99.0, "CRM"),
                Observation::new(day(2), 98.0, "CRM"),
            ])
            .unwrap();

        let removed = series.remove(0).unwrap();
        assert_eq!(removed.date, day(1));
        assert_eq!(series.len(), 1);
        assert!(series.remove(5).is_none());
    }
}
