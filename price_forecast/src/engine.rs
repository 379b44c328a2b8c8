//! Forecast orchestration and autoregressive rollout

use crate::confidence::confidence_score;
use crate::data::{Observation, Prediction};
use crate::error::{ForecastError, Result};
use crate::normalize::{NormalizationParams, SeriesNormalizer};
use crate::utils::round_to_cents;
use crate::window::{WindowedDatasetBuilder, DEFAULT_WINDOW_LENGTH};
use chrono::Days;
use forecast_net::{ForecastNetwork, NetworkConfig, TrainingStats};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// Days forecast when not configured otherwise
pub const DEFAULT_HORIZON_DAYS: usize = 5;

/// Minimum series length accepted by [`ForecastEngine::forecast`] by default
pub const DEFAULT_MIN_OBSERVATIONS: usize = 50;

/// Forecast settings
///
/// `min_observations` is a caller-facing policy rather than an algorithmic
/// need: the engine only strictly requires `window_length + 1` points. Set it
/// to 0 to fall back to that minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future calendar days to forecast
    pub horizon_days: usize,
    /// Prior values fed to the network per prediction
    pub window_length: usize,
    /// Shortest series accepted
    pub min_observations: usize,
    /// Network hyperparameters
    pub network: NetworkConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            window_length: DEFAULT_WINDOW_LENGTH,
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            network: NetworkConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ForecastError::MalformedInput(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_horizon_days(mut self, horizon_days: usize) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn with_window_length(mut self, window_length: usize) -> Self {
        self.window_length = window_length;
        self
    }

    pub fn with_min_observations(mut self, min_observations: usize) -> Self {
        self.min_observations = min_observations;
        self
    }

    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Series length below which forecasting is refused
    pub fn required_observations(&self) -> usize {
        self.min_observations.max(self.window_length + 1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least one day".to_string(),
            ));
        }
        if self.window_length == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window length must be positive".to_string(),
            ));
        }
        self.network.validate()?;
        Ok(())
    }
}

/// Predictions together with the diagnostics of the run that produced them
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub predictions: Vec<Prediction>,
    pub training: TrainingStats,
    pub params: NormalizationParams,
}

/// Stateless forecasting service
///
/// Every call fits its own normalization, trains its own network and drops
/// both before returning, so one engine can serve any number of series, from
/// any number of threads, without state leaking between calls.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast `horizon_days` prices following the series
    ///
    /// Either the full, chronologically ordered prediction list is returned or
    /// an error; there are no partial forecasts.
    pub fn forecast(&self, series: &[Observation]) -> Result<Vec<Prediction>> {
        Ok(self.forecast_with_report(series)?.predictions)
    }

    /// Same as [`forecast`](Self::forecast), also returning training statistics
    /// and the fitted normalization bounds
    pub fn forecast_with_report(&self, series: &[Observation]) -> Result<ForecastReport> {
        let required = self.config.required_observations();
        let last = match series.last() {
            Some(last) if series.len() >= required => last,
            _ => {
                return Err(ForecastError::InsufficientData {
                    required,
                    actual: series.len(),
                })
            }
        };

        let horizon_days = self.config.horizon_days;
        let final_date = u64::try_from(horizon_days)
            .ok()
            .and_then(|days| last.date.checked_add_days(Days::new(days)))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "A {} day horizon after {} is past the last representable date",
                    horizon_days, last.date
                ))
            })?;

        let params = SeriesNormalizer::fit(series)?;
        let normalized = SeriesNormalizer::normalize_series(series, &params);

        let window_length = self.config.window_length;
        let examples = WindowedDatasetBuilder::new(window_length)?.build(&normalized)?;
        debug!(
            "Training on {} windows of length {} (prices {:.2}..{:.2})",
            examples.len(),
            window_length,
            params.min,
            params.max
        );

        let mut network = ForecastNetwork::new(window_length, self.config.network.clone())?;
        let training = network.train(&examples)?;

        // Each prediction is fed back as the newest input, so errors compound.
        let mut window: VecDeque<f64> = normalized[normalized.len() - window_length..]
            .iter()
            .copied()
            .collect();
        let mut predictions = Vec::new();

        // Every date up to `final_date` is representable, checked above.
        for date in last.date.iter_days().skip(1).take(horizon_days) {
            let next = network.predict(window.make_contiguous())?;
            let price = SeriesNormalizer::denormalize(next, &params);

            predictions.push(Prediction {
                date,
                price: round_to_cents(price),
                confidence: confidence_score(next),
            });

            window.pop_front();
            window.push_back(next);
        }

        info!(
            "Forecast {} days for {} through {} after {} training iterations (error {:.6})",
            predictions.len(),
            last.symbol,
            final_date,
            training.iterations_run,
            training.final_error
        );

        Ok(ForecastReport {
            predictions,
            training,
            params,
        })
    }
}

/// Forecast with default settings apart from horizon and window length
pub fn forecast(
    series: &[Observation],
    horizon_days: usize,
    window_length: usize,
) -> Result<Vec<Prediction>> {
    let config = ForecastConfig::default()
        .with_horizon_days(horizon_days)
        .with_window_length(window_length);
    ForecastEngine::new(config)?.forecast(series)
}
