use chrono::NaiveDate;
use price_forecast::synthetic::KNOWN_SYMBOLS;
use price_forecast::{ForecastConfig, ForecastEngine, NetworkConfig, SyntheticSeriesGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Price Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    // Fixed end date and seeds so every run prints the same numbers
    let end = NaiveDate::from_ymd_opt(2024, 6, 28).ok_or("invalid end date")?;
    let mut generator = SyntheticSeriesGenerator::with_seed(2024);

    let config = ForecastConfig::default()
        .with_horizon_days(5)
        .with_network(NetworkConfig::default().with_seed(7));
    let engine = ForecastEngine::new(config)?;

    for symbol in KNOWN_SYMBOLS {
        let history = generator.generate_until(symbol, 60, end);
        let last = history.last().ok_or("empty history")?;
        println!(
            "{}: {} days of history, last close ${:.2} on {}",
            symbol,
            history.len(),
            last.price,
            last.date
        );

        let report = engine.forecast_with_report(&history)?;
        println!(
            "  trained for {} iterations, final error {:.6} ({:?})",
            report.training.iterations_run, report.training.final_error, report.training.stop_reason
        );
        for prediction in &report.predictions {
            println!(
                "  {}  ${:>9.2}  {}% confidence",
                prediction.date, prediction.price, prediction.confidence
            );
        }
        println!();
    }

    println!("Note: confidence is a display heuristic, not a statistical interval.");

    Ok(())
}
