//! Command line front end for the forecast engine.
//!
//! ```bash
//! # Forecast five days after 60 generated NVDA prices
//! forecast_demo --symbol NVDA --days 60
//!
//! # Forecast from a file with a custom horizon, as JSON
//! forecast_demo --input prices.csv --horizon 10 --json
//!
//! # Show training progress
//! RUST_LOG=debug forecast_demo --seed 7
//! ```

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use stock_predictor_workspace::price_forecast::synthetic::{DEFAULT_DAYS, DEFAULT_SYMBOL};
use stock_predictor_workspace::{
    DataLoader, ForecastConfig, ForecastEngine, ForecastError, Observation, SyntheticSeriesGenerator,
};

/// Forecast short-horizon stock prices with a small neural network
#[derive(Debug, Parser)]
#[command(name = "forecast_demo", version, about)]
struct Cli {
    /// Price history to forecast from (.json, otherwise CSV)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Symbol of the generated series when no input file is given
    #[arg(long, short, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Length of the generated series when no input file is given
    #[arg(long, short, default_value_t = DEFAULT_DAYS)]
    days: usize,

    /// Number of days to forecast
    #[arg(long)]
    horizon: Option<usize>,

    /// Prior values fed to the network per prediction
    #[arg(long)]
    window: Option<usize>,

    /// Seed for the generator and the network weights
    #[arg(long)]
    seed: Option<u64>,

    /// JSON forecast configuration; command line flags override it
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Print predictions as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ForecastError> {
    let mut config = match &cli.config {
        Some(path) => ForecastConfig::from_json_file(path)?,
        None => ForecastConfig::default(),
    };
    if let Some(horizon) = cli.horizon {
        config = config.with_horizon_days(horizon);
    }
    if let Some(window) = cli.window {
        config = config.with_window_length(window);
    }
    if let Some(seed) = cli.seed {
        config.network = config.network.with_seed(seed);
    }

    let history = load_history(&cli)?;
    info!("Loaded {} observations", history.len());

    let engine = ForecastEngine::new(config)?;
    let predictions = engine.forecast(&history)?;

    if cli.json {
        let output = serde_json::to_string_pretty(&predictions)?;
        println!("{output}");
    } else {
        println!("{:<12} {:>12} {:>11}", "Date", "Price", "Confidence");
        for prediction in &predictions {
            println!(
                "{:<12} {:>12.2} {:>10}%",
                prediction.date.to_string(),
                prediction.price,
                prediction.confidence
            );
        }
    }

    Ok(())
}

fn load_history(cli: &Cli) -> Result<Vec<Observation>, ForecastError> {
    if let Some(path) = &cli.input {
        return DataLoader::from_path(path);
    }

    let mut generator = match cli.seed {
        Some(seed) => SyntheticSeriesGenerator::with_seed(seed),
        None => SyntheticSeriesGenerator::new(),
    };
    Ok(generator.generate(&cli.symbol, cli.days))
}
