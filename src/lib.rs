//! # Stock Predictor
//!
//! Workspace facade over the two forecasting crates:
//!
//! - [`forecast_net`]: a small sigmoid feedforward network trained with
//!   online backpropagation
//! - [`price_forecast`]: normalization, windowing, the forecast engine,
//!   synthetic series and data ingestion
//!
//! ## Example
//!
//! ```
//! use stock_predictor_workspace::price_forecast::{ForecastConfig, ForecastEngine, NetworkConfig};
//! use stock_predictor_workspace::price_forecast::SyntheticSeriesGenerator;
//!
//! let history = SyntheticSeriesGenerator::with_seed(1).generate("MSFT", 60);
//! let config = ForecastConfig::default()
//!     .with_horizon_days(3)
//!     .with_network(NetworkConfig::default().with_seed(1).with_iterations(200));
//!
//! let predictions = ForecastEngine::new(config)?.forecast(&history)?;
//! assert_eq!(predictions.len(), 3);
//! # Ok::<(), stock_predictor_workspace::price_forecast::ForecastError>(())
//! ```

pub use forecast_net;
pub use price_forecast;

pub use price_forecast::{
    DataLoader, ForecastConfig, ForecastEngine, ForecastError, NetworkConfig, Observation,
    Prediction, SyntheticSeriesGenerator,
};
