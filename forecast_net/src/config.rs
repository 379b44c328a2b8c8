//! Network hyperparameters

use crate::{NetworkError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hyperparameters for a [`ForecastNetwork`](crate::ForecastNetwork)
///
/// Defaults: hidden layers `[3, 3]`, learning rate `0.3`, momentum `0.1`,
/// at most `2000` iterations, early stop once the mean squared training error
/// drops below `0.005`, progress logged every `100` iterations.
///
/// Without a `seed` weights are drawn from OS entropy, so two trainings on the
/// same data will generally yield slightly different predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Units per hidden layer, input side first
    pub hidden_layers: Vec<usize>,
    /// Gradient step size
    pub learning_rate: f64,
    /// Fraction of the previous weight change carried into the next one
    pub momentum: f64,
    /// Maximum number of passes over the training set
    pub iterations: usize,
    /// Mean squared error below which training stops early
    pub error_threshold: f64,
    /// Log progress every `log_period` iterations (0 disables)
    pub log_period: usize,
    /// Seed for weight initialization
    pub seed: Option<u64>,
    /// Wall-clock cap on training in milliseconds
    pub time_limit_ms: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![3, 3],
            learning_rate: 0.3,
            momentum: 0.1,
            iterations: 2000,
            error_threshold: 0.005,
            log_period: 100,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl NetworkConfig {
    pub fn with_hidden_layers(mut self, hidden_layers: Vec<usize>) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_error_threshold(mut self, error_threshold: f64) -> Self {
        self.error_threshold = error_threshold;
        self
    }

    pub fn with_log_period(mut self, log_period: usize) -> Self {
        self.log_period = log_period;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cap training time; limits are rounded up to whole milliseconds
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        let partial = u128::from(limit.subsec_nanos() % 1_000_000 != 0);
        let millis = u64::try_from(limit.as_millis() + partial).unwrap_or(u64::MAX);
        self.time_limit_ms = Some(millis);
        self
    }

    /// Wall-clock training cap, if any
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Check every hyperparameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.hidden_layers.iter().any(|&units| units == 0) {
            return Err(NetworkError::InvalidConfig(
                "Hidden layers must have at least one unit".to_string(),
            ));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "Learning rate must be positive, got {}",
                self.learning_rate
            )));
        }

        if !(0.0..1.0).contains(&self.momentum) {
            return Err(NetworkError::InvalidConfig(format!(
                "Momentum must be in [0, 1), got {}",
                self.momentum
            )));
        }

        if self.iterations == 0 {
            return Err(NetworkError::InvalidConfig(
                "Iteration limit must be positive".to_string(),
            ));
        }

        if !self.error_threshold.is_finite() || self.error_threshold < 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "Error threshold must be non-negative, got {}",
                self.error_threshold
            )));
        }

        Ok(())
    }
}
