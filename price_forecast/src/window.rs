//! Sliding-window supervised dataset construction

use crate::error::{ForecastError, Result};
use forecast_net::TrainingSample;
use serde::{Deserialize, Serialize};

/// Number of prior values used per prediction unless configured otherwise
pub const DEFAULT_WINDOW_LENGTH: usize = 5;

/// One input window and the value that immediately followed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: Vec<f64>,
    pub output: f64,
}

impl TrainingSample for TrainingExample {
    fn input(&self) -> &[f64] {
        &self.input
    }

    fn target(&self) -> f64 {
        self.output
    }
}

/// Turns a normalized series into chronological training examples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowedDatasetBuilder {
    window_length: usize,
}

impl Default for WindowedDatasetBuilder {
    fn default() -> Self {
        Self {
            window_length: DEFAULT_WINDOW_LENGTH,
        }
    }
}

impl WindowedDatasetBuilder {
    pub fn new(window_length: usize) -> Result<Self> {
        if window_length == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window length must be positive".to_string(),
            ));
        }

        Ok(Self { window_length })
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// Build `len - window_length` examples; the i-th uses values
    /// `[i, i + window_length)` as input and value `i + window_length` as output
    pub fn build(&self, normalized: &[f64]) -> Result<Vec<TrainingExample>> {
        if normalized.len() <= self.window_length {
            return Err(ForecastError::InsufficientData {
                required: self.window_length + 1,
                actual: normalized.len(),
            });
        }

        Ok(normalized
            .windows(self.window_length + 1)
            .map(|w| TrainingExample {
                input: w[..self.window_length].to_vec(),
                output: w[self.window_length],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_length() {
        assert_eq!(WindowedDatasetBuilder::default().window_length(), 5);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(WindowedDatasetBuilder::new(0).is_err());
    }

    #[test]
    fn test_examples_are_chronological() {
        let builder = WindowedDatasetBuilder::new(2).unwrap();
        let examples = builder.build(&[0.0, 0.25, 0.5, 0.75, 1.0]).unwrap();

        assert_eq!(examples.len(), 3);
        assert_eq!(examples[0].input, vec![0.0, 0.25]);
        assert_eq!(examples[0].output, 0.5);
        assert_eq!(examples[2].input, vec![0.5, 0.75]);
        assert_eq!(examples[2].output, 1.0);
    }
}
