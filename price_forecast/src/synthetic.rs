//! Synthetic price series for demos and tests
//!
//! Paths combine a random walk scaled by a per-symbol volatility, a small
//! trend drawn once per series, a Monday/Friday effect and rare ±5% shocks.
//!
//! [`SyntheticSeriesGenerator::generate`] ends at today's local date and is
//! therefore time dependent. Use [`SyntheticSeriesGenerator::with_seed`] and
//! [`SyntheticSeriesGenerator::generate_until`] for reproducible output.

use crate::data::Observation;
use crate::utils::round_to_cents;
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Symbols with a dedicated price profile
pub const KNOWN_SYMBOLS: [&str; 5] = ["AMZN", "GOOGL", "CRM", "MSFT", "NVDA"];

/// Symbol used when the caller does not pick one
pub const DEFAULT_SYMBOL: &str = "AMZN";

/// Series length used when the caller does not pick one
pub const DEFAULT_DAYS: usize = 60;

/// Prices never fall below this floor
pub const PRICE_FLOOR: f64 = 50.0;

const SHOCK_PROBABILITY: f64 = 0.05;
const SHOCK_DOWN: f64 = 0.95;
const SHOCK_UP: f64 = 1.05;
const MONDAY_EFFECT: f64 = 2.0;
const FRIDAY_EFFECT: f64 = -1.0;
const MAX_TREND: f64 = 0.01;
const MIN_VOLUME: u64 = 1_000_000;
const MAX_VOLUME: u64 = 6_000_000;

/// Starting price and daily volatility of a symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolProfile {
    pub base_price: f64,
    pub volatility: f64,
}

impl SymbolProfile {
    /// Profile for a known symbol, or the default 150 / 8 profile
    pub fn for_symbol(symbol: &str) -> Self {
        let (base_price, volatility) = match symbol {
            "AMZN" => (150.0, 8.0),
            "GOOGL" => (140.0, 7.0),
            "CRM" => (250.0, 12.0),
            "MSFT" => (390.0, 6.0),
            "NVDA" => (900.0, 25.0),
            _ => (150.0, 8.0),
        };

        Self {
            base_price,
            volatility,
        }
    }
}

/// Random-walk price path generator
#[derive(Debug, Clone)]
pub struct SyntheticSeriesGenerator {
    rng: StdRng,
}

impl Default for SyntheticSeriesGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticSeriesGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator producing the same path for the same seed and end date
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `days` consecutive daily observations ending today
    pub fn generate(&mut self, symbol: &str, days: usize) -> Vec<Observation> {
        let today = Local::now().date_naive();
        self.generate_until(symbol, days, today)
    }

    /// `days` consecutive daily observations, the last one dated `end`
    ///
    /// `days` saturates at the number of calendar days from
    /// [`NaiveDate::MIN`] through `end`, so a non-empty series always ends on
    /// `end` and may be shorter than requested.
    pub fn generate_until(&mut self, symbol: &str, days: usize, end: NaiveDate) -> Vec<Observation> {
        let available = end.signed_duration_since(NaiveDate::MIN).num_days() + 1;
        let days = usize::try_from(available).map_or(days, |available| days.min(available));

        let profile = SymbolProfile::for_symbol(symbol);
        let trend = self.rng.gen_range(-MAX_TREND..MAX_TREND);
        let start = u64::try_from(days.saturating_sub(1))
            .ok()
            .and_then(|back| end.checked_sub_days(Days::new(back)))
            .unwrap_or(NaiveDate::MIN);

        let mut price = profile.base_price;
        let mut data = Vec::with_capacity(days);

        for date in start.iter_days().take(days) {
            let daily_change = (self.rng.gen::<f64>() - 0.5) * profile.volatility;
            let trend_change = trend * price * 0.01;
            price = (price + daily_change + trend_change + weekday_effect(date)).max(PRICE_FLOOR);

            if self.rng.gen::<f64>() < SHOCK_PROBABILITY {
                let factor = if self.rng.gen_bool(0.5) {
                    SHOCK_DOWN
                } else {
                    SHOCK_UP
                };
                price = (price * factor).max(PRICE_FLOOR);
            }

            let volume = self.rng.gen_range(MIN_VOLUME..MAX_VOLUME);
            data.push(Observation::new(date, round_to_cents(price), symbol).with_volume(volume));
        }

        debug!(
            "Generated {} synthetic observations for {} (trend {:+.4})",
            data.len(),
            symbol,
            trend
        );

        data
    }
}

fn weekday_effect(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Mon => MONDAY_EFFECT,
        Weekday::Fri => FRIDAY_EFFECT,
        _ => 0.0,
    }
}
