//! # Price Forecast
//!
//! Short-horizon stock price forecasting with a small feedforward neural network.
//!
//! ## Features
//!
//! - Min-max normalization of a price series into `[0, 1]`
//! - Sliding-window dataset construction
//! - Training of an owned [`forecast_net::ForecastNetwork`] per forecast
//! - Autoregressive multi-day rollout with a heuristic confidence score
//! - Synthetic price paths for demos and tests
//! - CSV and JSON ingestion of price history
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_forecast::{ForecastConfig, ForecastEngine, SyntheticSeriesGenerator};
//!
//! // Generate 60 days of history
//! let history = SyntheticSeriesGenerator::new().generate("NVDA", 60);
//!
//! // Forecast the next 5 calendar days
//! let engine = ForecastEngine::new(ForecastConfig::default())?;
//! for prediction in engine.forecast(&history)? {
//!     println!(
//!         "{}: ${:.2} ({}% confidence)",
//!         prediction.date, prediction.price, prediction.confidence
//!     );
//! }
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```
//!
//! The confidence score is a display heuristic based on the distance of the
//! normalized prediction from the middle of the historical range; it is not a
//! statistical interval.

pub mod confidence;
pub mod data;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod synthetic;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use crate::data::{HistoricalSeries, Observation, Prediction};
pub use crate::engine::{forecast, ForecastConfig, ForecastEngine, ForecastReport};
pub use crate::error::{ForecastError, Result};
pub use crate::ingest::DataLoader;
pub use crate::normalize::{NormalizationParams, SeriesNormalizer};
pub use crate::synthetic::{SymbolProfile, SyntheticSeriesGenerator};
pub use crate::window::{TrainingExample, WindowedDatasetBuilder};
pub use forecast_net::{NetworkConfig, StopReason, TrainingStats};
