//! Text ingestion: delimited (CSV) and structured (JSON) price history
//!
//! Both formats carry `date` and `price` plus optional `symbol` (defaults to
//! `"UNKNOWN"`) and `volume`. The CSV reader is lenient and skips rows that
//! lack a usable date or price; the JSON reader is strict and fails with
//! [`ForecastError::MalformedInput`] on the first bad element. Results are
//! sorted by date.

use crate::data::Observation;
use crate::error::{ForecastError, Result};
use crate::utils::date_parser::parse_date;
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Symbol assigned to rows that do not name one
pub const DEFAULT_SYMBOL: &str = "UNKNOWN";

/// Parse CSV text with a header row
pub fn parse_csv(text: &str) -> Result<Vec<Observation>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let (date_col, price_col) = match (column("date"), column("price")) {
        (Some(date), Some(price)) => (date, price),
        _ => {
            warn!("CSV header {:?} lacks a date or price column", headers);
            return Ok(Vec::new());
        }
    };
    let symbol_col = column("symbol");
    let volume_col = column("volume");

    let mut data = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .filter(|value| !value.is_empty())
        };

        let date = field(Some(date_col)).and_then(|value| parse_date(value).ok());
        let price = field(Some(price_col))
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|price| price.is_finite() && *price > 0.0);

        let (date, price) = match (date, price) {
            (Some(date), Some(price)) => (date, price),
            _ => {
                debug!("Skipping CSV row {} without a usable date and price", row + 1);
                continue;
            }
        };

        data.push(Observation {
            date,
            price,
            symbol: field(symbol_col).unwrap_or(DEFAULT_SYMBOL).to_string(),
            volume: field(volume_col).and_then(parse_volume_str),
        });
    }

    data.sort_by_key(|o| o.date);
    Ok(data)
}

/// Parse a JSON array of observation objects
///
/// A document that is valid JSON but not an array yields an empty series.
pub fn parse_json(text: &str) -> Result<Vec<Observation>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| ForecastError::MalformedInput(format!("Invalid JSON format: {}", e)))?;

    let items = match document {
        Value::Array(items) => items,
        other => {
            warn!("Expected a JSON array of observations, found {}", kind(&other));
            return Ok(Vec::new());
        }
    };

    let mut data = items
        .iter()
        .enumerate()
        .map(|(index, item)| observation_from_json(index, item))
        .collect::<Result<Vec<_>>>()?;

    data.sort_by_key(|o| o.date);
    Ok(data)
}

/// Serialize observations as CSV with a `date,price,symbol,volume` header
pub fn to_csv(observations: &[Observation]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for observation in observations {
        writer.serialize(observation)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ForecastError::CsvError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ForecastError::CsvError(e.to_string()))
}

/// Serialize observations as a pretty-printed JSON array
pub fn to_json(observations: &[Observation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(observations)?)
}

/// File-based loading helpers
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load observations from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
        let text = fs::read_to_string(path)?;
        parse_csv(&text)
    }

    /// Load observations from a JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
        let text = fs::read_to_string(path)?;
        parse_json(&text)
    }

    /// Load a file, choosing the format from its extension (`.json` or CSV)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(path)
        } else {
            Self::from_csv(path)
        }
    }
}

fn observation_from_json(index: usize, item: &Value) -> Result<Observation> {
    let object = item.as_object().ok_or_else(|| {
        ForecastError::MalformedInput(format!("Element {} is not an object", index))
    })?;

    let date = object
        .get("date")
        .and_then(Value::as_str)
        .ok_or_else(|| ForecastError::MalformedInput(format!("Element {} has no date", index)))
        .and_then(parse_date)?;

    let price = match object.get("price") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|price| price.is_finite() && *price > 0.0)
    .ok_or_else(|| {
        ForecastError::MalformedInput(format!("Element {} has no valid price", index))
    })?;

    let symbol = object
        .get("symbol")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SYMBOL)
        .to_string();

    let volume = match object.get("volume") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v.trunc() as u64)),
        Some(Value::String(s)) => parse_volume_str(s),
        _ => None,
    };

    Ok(Observation {
        date,
        price,
        symbol,
        volume,
    })
}

fn parse_volume_str(value: &str) -> Option<u64> {
    let value = value.trim();
    value.parse::<u64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.trunc() as u64)
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
