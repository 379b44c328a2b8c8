//! Min-max scaling of prices into `[0, 1]`

use crate::data::Observation;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Bounds fitted over a full series; `max > min` always holds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    pub min: f64,
    pub max: f64,
}

impl NormalizationParams {
    /// Build params from explicit bounds
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "Normalization bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if max == min {
            return Err(ForecastError::DegenerateInput { value: min });
        }
        if max < min {
            return Err(ForecastError::InvalidParameter(format!(
                "Normalization max ({}) is below min ({})",
                max, min
            )));
        }

        Ok(Self { min, max })
    }

    /// Width of the fitted range
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Maps raw prices to `[0, 1]` using a series' own extremes, and back
#[derive(Debug)]
pub struct SeriesNormalizer;

impl SeriesNormalizer {
    /// Fit bounds over every price in the series
    pub fn fit(series: &[Observation]) -> Result<NormalizationParams> {
        let prices: Vec<f64> = series.iter().map(|o| o.price).collect();
        Self::fit_values(&prices)
    }

    /// Fit bounds over raw values
    ///
    /// A flat series fails with [`ForecastError::DegenerateInput`] instead of
    /// producing NaN on the way through.
    pub fn fit_values(values: &[f64]) -> Result<NormalizationParams> {
        if values.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidObservation(format!(
                "cannot normalize non-finite price {}",
                bad
            )));
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        NormalizationParams::new(min, max)
    }

    pub fn normalize(price: f64, params: &NormalizationParams) -> f64 {
        (price - params.min) / params.range()
    }

    pub fn denormalize(value: f64, params: &NormalizationParams) -> f64 {
        value * params.range() + params.min
    }

    /// Normalize every price of a series, preserving order
    pub fn normalize_series(series: &[Observation], params: &NormalizationParams) -> Vec<f64> {
        series
            .iter()
            .map(|o| Self::normalize(o.price, params))
            .collect()
    }
}
