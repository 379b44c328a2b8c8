//! Error types for the price_forecast crate

use chrono::NaiveDate;
use forecast_net::NetworkError;
use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Every price in the series is identical, so min-max scaling is undefined
    #[error("Degenerate input: every price equals {value}, a flat series cannot be normalized")]
    DegenerateInput { value: f64 },

    /// Too few observations for the window length or the minimum-points policy
    #[error("Insufficient data: at least {required} observations are required, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Non-finite weights or error during training
    #[error("Training diverged at iteration {iteration}; retrying may succeed with fresh weights")]
    TrainingDiverged { iteration: usize },

    /// Structured input could not be parsed
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An observation failed boundary validation
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    /// A date already present in the series was added again
    #[error("Date already exists: {0}")]
    DuplicateDate(NaiveDate),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other failure reported by the network
    #[error("Network error: {0}")]
    NetworkError(NetworkError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV reader or writer
    #[error("CSV error: {0}")]
    CsvError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<NetworkError> for ForecastError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Diverged { iteration } => ForecastError::TrainingDiverged { iteration },
            other => ForecastError::NetworkError(other),
        }
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::MalformedInput(err.to_string())
    }
}
