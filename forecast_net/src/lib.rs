//! # Forecast Net
//!
//! A small, fully owned feedforward neural network used to predict the next
//! value of a normalized time series from a fixed-length window of prior values.
//!
//! The architecture is deliberately tiny and documented:
//!
//! - input layer sized to the window length
//! - two hidden layers of 3 units each (configurable)
//! - a single output unit
//! - sigmoid activation on every layer, so outputs stay inside `(0, 1)`
//! - online backpropagation with momentum and an explicit iteration cap
//!
//! ## Usage Example
//!
//! ```
//! use forecast_net::{ForecastNetwork, NetworkConfig};
//!
//! let config = NetworkConfig::default().with_seed(7);
//! let mut network = ForecastNetwork::new(2, config)?;
//!
//! let examples = vec![
//!     (vec![0.1, 0.2], 0.3),
//!     (vec![0.2, 0.3], 0.4),
//!     (vec![0.3, 0.4], 0.5),
//! ];
//! let stats = network.train(&examples)?;
//! assert!(stats.final_error.is_finite());
//!
//! let next = network.predict(&[0.4, 0.5])?;
//! assert!(next > 0.0 && next < 1.0);
//! # Ok::<(), forecast_net::NetworkError>(())
//! ```

use thiserror::Error;

pub mod activation;
pub mod config;
pub mod network;

pub use config::NetworkConfig;
pub use network::{ForecastNetwork, StopReason, TrainingStats, TrainingSample};

/// Errors that can occur while building, training or running a network
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Invalid network configuration: {0}")]
    InvalidConfig(String),

    #[error("Input size mismatch: expected {expected} values, got {actual}")]
    InputSize { expected: usize, actual: usize },

    #[error("Invalid network input: {0}")]
    InvalidInput(String),

    #[error("Cannot train on an empty training set")]
    EmptyTrainingSet,

    #[error("Training diverged at iteration {iteration}: non-finite weights or error")]
    Diverged { iteration: usize },
}

/// Result type for network operations
pub type Result<T> = std::result::Result<T, NetworkError>;
